//! Error taxonomy shared by all mesh loaders.

use thiserror::Error;

/// Errors surfaced by a single load call. None of these are fatal to the
/// process; the caller decides whether to retry with another file.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("can not open mesh file: {0}")]
    Io(#[from] std::io::Error),

    #[error("expected {expected} header, found {found:?}")]
    FormatMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("invalid header: vertex count {vertices} and face count {faces} must be positive")]
    InvalidHeader { vertices: i64, faces: i64 },

    #[error("malformed face at line {line}: {reason}")]
    MalformedFace { line: usize, reason: String },

    #[error("face index {index} at line {line} out of range for {len} entries")]
    IndexOutOfRange {
        line: usize,
        index: usize,
        len: usize,
    },

    #[error("malformed {record} record at line {line}")]
    Parse { line: usize, record: &'static str },

    #[error("unexpected end of file while reading {record}")]
    UnexpectedEof { record: &'static str },

    #[error("{format} format is not supported: {reason}")]
    Unsupported {
        format: &'static str,
        reason: &'static str,
    },
}
