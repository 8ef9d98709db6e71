//! Fixed camera and screen projection for the terminal rasterizer.

use nalgebra::{Matrix4, Point3, Vector3};

/// Terminal-sized perspective camera. The configuration is fixed at
/// construction; there is no interactive control.
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            eye: Point3::new(0.0, 0.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 100.0,
        }
    }

    fn view_projection(&self) -> Matrix4<f32> {
        let aspect = self.width as f32 / self.height as f32;
        Matrix4::new_perspective(aspect, self.fov, self.near, self.far)
            * Matrix4::look_at_rh(&self.eye, &self.target, &self.up)
    }

    /// Projects a point into screen space, returning `None` when it
    /// falls outside the view volume or too close to the eye plane.
    pub fn project(&self, point: &Point3<f32>, model: &Matrix4<f32>) -> Option<(f32, f32, f32)> {
        let clip = (self.view_projection() * model).transform_point(point);

        if clip.z.abs() < 1e-6 {
            return None;
        }
        let ndc_x = clip.x / clip.z;
        let ndc_y = clip.y / clip.z;
        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
            return None;
        }

        Some((
            (ndc_x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc_y) * 0.5 * self.height as f32,
            clip.z,
        ))
    }
}
