//! Smooth per-vertex normal generation.

use nalgebra::{Point3, Vector3};

use crate::geometry::Triangle;

/// Computes one smooth normal per vertex by summing unnormalized face
/// normals into every incident vertex slot, then normalizing each sum.
/// The cross products are left unnormalized during accumulation, so a
/// face contributes in proportion to its area.
///
/// Vertices touched only by degenerate faces, or by no face at all, keep
/// the zero vector rather than going NaN.
pub fn smooth_normals(points: &[Point3<f32>], triangles: &[Triangle]) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::zeros(); points.len()];

    for &[a, b, c] in triangles {
        let p1 = points[a];
        let p2 = points[b];
        let p3 = points[c];

        let face = (p1 - p2).cross(&(p1 - p3));
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for normal in &mut normals {
        *normal = normal
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros);
    }

    normals
}
