//! MeshView core library.
//!
//! Triangle-mesh containers, loaders for the OFF/OBJ/LSA ASCII formats
//! and smooth per-vertex normal generation. Rendering is left to a
//! collaborator that consumes [`TriangleMesh::corners`].

pub mod error;
pub mod geometry;
pub mod lsa;
pub mod normals;
pub mod obj;
pub mod object;
pub mod off;
mod parse;

pub use error::MeshError;
pub use geometry::{Corner, Triangle, TriangleMesh};
pub use obj::{ObjOptions, ObjTopology};
pub use object::MeshObject;

use std::path::Path;

/// Loads a mesh, picking the loader from the file extension
/// (case-insensitive `.off`, `.obj` or `.lsa`).
pub fn load_path(path: impl AsRef<Path>) -> Result<TriangleMesh, MeshError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("off") => off::from_path(path),
        Some("obj") => obj::from_path(path),
        Some("lsa") => lsa::from_path(path),
        _ => Err(MeshError::Unsupported {
            format: "unknown",
            reason: "expected a .off, .obj or .lsa file",
        }),
    }
}
