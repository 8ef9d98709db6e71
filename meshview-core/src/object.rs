//! Positioned groups of triangle meshes.

use std::path::Path;

use nalgebra::Vector3;

use crate::error::MeshError;
use crate::geometry::TriangleMesh;

/// A renderable group of meshes sharing one translation offset. The
/// group offset composes with each mesh's own offset at draw time.
#[derive(Debug, Clone, Default)]
pub struct MeshObject {
    meshes: Vec<TriangleMesh>,
    position: Vector3<f32>,
}

impl MeshObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            meshes: Vec::new(),
            position: Vector3::new(x, y, z),
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn meshes(&self) -> &[TriangleMesh] {
        &self.meshes
    }

    pub fn add_mesh(&mut self, mesh: TriangleMesh) {
        self.meshes.push(mesh);
    }

    /// Loads a mesh file (format picked by extension) and appends it.
    pub fn load_and_add(&mut self, path: impl AsRef<Path>) -> Result<(), MeshError> {
        self.meshes.push(crate::load_path(path)?);
        Ok(())
    }
}
