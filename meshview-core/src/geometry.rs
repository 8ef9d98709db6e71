//! Indexed triangle-mesh container.

use std::path::Path;

use log::warn;
use nalgebra::{Point2, Point3, Vector3};

use crate::error::MeshError;
use crate::obj::ObjOptions;
use crate::{lsa, obj, off};

/// Three 0-based indices into the vertex array, in input winding order.
pub type Triangle = [usize; 3];

/// One triangle corner with every attribute resolved, regardless of
/// whether the mesh shares vertices or duplicates them per corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub tex: Option<Point2<f32>>,
}

/// Geometry store for a triangle mesh.
///
/// Owns vertex positions, triangle index triples, per-vertex normals and
/// optional texture coordinates, plus a translation offset that only
/// matters at draw time. A `None` texture entry means the file supplied
/// no UV for that corner. Loaders guarantee `normals.len() ==
/// points.len()` and in-bounds triangle indices; callers holding the
/// `_mut` accessors must not break either invariant.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    points: Vec<Point3<f32>>,
    triangles: Vec<Triangle>,
    normals: Vec<Vector3<f32>>,
    tex_coords: Vec<Option<Point2<f32>>>,
    position: Vector3<f32>,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        points: Vec<Point3<f32>>,
        triangles: Vec<Triangle>,
        normals: Vec<Vector3<f32>>,
        tex_coords: Vec<Option<Point2<f32>>>,
    ) -> Self {
        debug_assert_eq!(normals.len(), points.len());
        debug_assert!(tex_coords.is_empty() || tex_coords.len() == points.len());
        Self {
            points,
            triangles,
            normals,
            tex_coords,
            position: Vector3::zeros(),
        }
    }

    /// Empties all geometry arrays. The translation offset is kept.
    pub fn clear(&mut self) {
        self.points.clear();
        self.triangles.clear();
        self.normals.clear();
        self.tex_coords.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut Vec<Point3<f32>> {
        &mut self.points
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangles_mut(&mut self) -> &mut Vec<Triangle> {
        &mut self.triangles
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn normals_mut(&mut self) -> &mut Vec<Vector3<f32>> {
        &mut self.normals
    }

    pub fn tex_coords(&self) -> &[Option<Point2<f32>>] {
        &self.tex_coords
    }

    /// Negates every normal in place. Applying it twice restores the
    /// original orientation.
    pub fn flip_normals(&mut self) {
        for normal in &mut self.normals {
            *normal = -*normal;
        }
    }

    /// Sets the draw-time translation offset. Stored coordinates are
    /// not touched.
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    /// Iterates over the triangles as corner triples with resolved
    /// attributes. This is the view the renderer consumes; it needs no
    /// knowledge of which loader topology produced the mesh.
    pub fn corners(&self) -> impl Iterator<Item = [Corner; 3]> + '_ {
        self.triangles.iter().map(move |tri| {
            tri.map(|i| Corner {
                position: self.points[i],
                normal: self.normals.get(i).copied().unwrap_or_else(Vector3::zeros),
                tex: self.tex_coords.get(i).copied().flatten(),
            })
        })
    }

    /// Replaces this mesh's geometry with the contents of an OFF file.
    /// On error the current contents are left untouched.
    pub fn load_off(&mut self, path: impl AsRef<Path>) -> Result<(), MeshError> {
        let path = path.as_ref();
        match off::from_path(path) {
            Ok(loaded) => {
                self.replace_with(loaded);
                Ok(())
            }
            Err(e) => {
                warn!("load_off {}: {e}", path.display());
                Err(e)
            }
        }
    }

    /// Replaces this mesh's geometry with the contents of an OBJ file,
    /// using the default index-sharing topology.
    pub fn load_obj(&mut self, path: impl AsRef<Path>) -> Result<(), MeshError> {
        self.load_obj_with(path, ObjOptions::default())
    }

    /// Replaces this mesh's geometry with the contents of an OBJ file.
    /// On error the current contents are left untouched.
    pub fn load_obj_with(
        &mut self,
        path: impl AsRef<Path>,
        options: ObjOptions,
    ) -> Result<(), MeshError> {
        let path = path.as_ref();
        match obj::from_path_with(path, options) {
            Ok(loaded) => {
                self.replace_with(loaded);
                Ok(())
            }
            Err(e) => {
                warn!("load_obj {}: {e}", path.display());
                Err(e)
            }
        }
    }

    /// LSA loads always fail: the header is validated but the body
    /// encoding is unsupported. The current contents survive.
    pub fn load_lsa(&mut self, path: impl AsRef<Path>) -> Result<(), MeshError> {
        let path = path.as_ref();
        match lsa::from_path(path) {
            Ok(loaded) => {
                self.replace_with(loaded);
                Ok(())
            }
            Err(e) => {
                warn!("load_lsa {}: {e}", path.display());
                Err(e)
            }
        }
    }

    fn replace_with(&mut self, loaded: TriangleMesh) {
        self.points = loaded.points;
        self.triangles = loaded.triangles;
        self.normals = loaded.normals;
        self.tex_coords = loaded.tex_coords;
        // position is caller state, not file state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_OFF: &str = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";

    fn sample_mesh() -> TriangleMesh {
        off::parse(SAMPLE_OFF).unwrap()
    }

    #[test]
    fn test_clear_empties_every_accessor() {
        let mut mesh = sample_mesh();
        assert!(!mesh.is_empty());

        mesh.clear();
        assert!(mesh.points().is_empty());
        assert!(mesh.triangles().is_empty());
        assert!(mesh.normals().is_empty());
        assert!(mesh.tex_coords().is_empty());
    }

    #[test]
    fn test_flip_normals_twice_round_trips() {
        let mut mesh = sample_mesh();
        let original = mesh.normals().to_vec();

        mesh.flip_normals();
        for (flipped, orig) in mesh.normals().iter().zip(&original) {
            assert_eq!(*flipped, -orig);
        }

        mesh.flip_normals();
        assert_eq!(mesh.normals(), &original[..]);
    }

    #[test]
    fn test_position_is_draw_state_only() {
        let mut mesh = sample_mesh();
        let points = mesh.points().to_vec();

        mesh.set_position(1.0, 2.0, 3.0);
        assert_eq!(mesh.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.points(), &points[..]);
    }

    #[test]
    fn test_corners_resolve_attributes() {
        let mesh = sample_mesh();
        let corners: Vec<_> = mesh.corners().collect();

        assert_eq!(corners.len(), 1);
        let [a, b, c] = corners[0];
        assert_eq!(a.position, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(b.position, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(c.position, Point3::new(0.0, 1.0, 0.0));
        assert!(a.tex.is_none());
        assert!((a.normal - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_failed_load_keeps_previous_geometry() {
        let mut mesh = sample_mesh();
        mesh.set_position(4.0, 5.0, 6.0);

        let err = mesh.load_off("/nonexistent/meshview-test.off");
        assert!(matches!(err, Err(MeshError::Io(_))));
        assert_eq!(mesh.points().len(), 3);
        assert_eq!(mesh.triangles().len(), 1);
        assert_eq!(mesh.position(), Vector3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_successful_load_replaces_geometry_and_keeps_position() {
        let path = std::env::temp_dir().join("meshview-geometry-load.off");
        std::fs::write(&path, SAMPLE_OFF).unwrap();

        let mut mesh = TriangleMesh::new();
        mesh.set_position(0.5, 0.0, 0.0);
        mesh.load_off(&path).unwrap();

        assert_eq!(mesh.points().len(), 3);
        assert_eq!(mesh.triangles(), &[[0, 1, 2]]);
        assert_eq!(mesh.position(), Vector3::new(0.5, 0.0, 0.0));
    }
}
