//! ASCII rasterizer for terminal rendering.

use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use meshview_core::{Corner, TriangleMesh};
use nalgebra::{Matrix4, Vector3};
use std::io::Write;

use crate::view::Viewport;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Depth-buffered rasterizer that shades triangles from their smooth
/// per-corner normals and writes the frame as terminal characters.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn chars(&self) -> &[char] {
        &self.char_buffer
    }

    /// Rasterizes every triangle of the mesh. The mesh's own translation
    /// offset composes into the model matrix; the corner view hides
    /// whether the loader shared vertices or duplicated them.
    pub fn render_mesh(&mut self, mesh: &TriangleMesh, model: &Matrix4<f32>, viewport: &Viewport) {
        let model = model * Matrix4::new_translation(&mesh.position());
        for corners in mesh.corners() {
            self.render_triangle(&corners, &model, viewport);
        }
    }

    fn render_triangle(
        &mut self,
        corners: &[Corner; 3],
        model: &Matrix4<f32>,
        viewport: &Viewport,
    ) {
        let mut projected = [(0.0f32, 0.0f32, 0.0f32); 3];
        for (slot, corner) in projected.iter_mut().zip(corners) {
            match viewport.project(&corner.position, model) {
                Some(screen) => *slot = screen,
                None => return, // triangle is clipped
            }
        }

        // per-corner brightness from the smooth normals, fixed headlight
        let light = Vector3::new(0.0, 0.0, 1.0);
        let brightness = [
            corners[0].normal.dot(&light).max(0.0),
            corners[1].normal.dot(&light).max(0.0),
            corners[2].normal.dot(&light).max(0.0),
        ];

        self.rasterize(&projected, &brightness);
    }

    fn rasterize(&mut self, coords: &[(f32, f32, f32); 3], brightness: &[f32; 3]) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    // Gouraud-style: interpolate corner brightness
                    let level = w0 * brightness[0] + w1 * brightness[1] + w2 * brightness[2];
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = shade_char(level);
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    _ => Color::Cyan,
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn shade_char(level: f32) -> char {
    let index = (level.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Barycentric coordinates of a point in a screen-space triangle.
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);
    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    Some((w0, w1, 1.0 - w0 - w1))
}
