//! OFF (Object File Format) loader.
//!
//! ```text
//! OFF
//! nv nf ne
//! x y z          (nv rows)
//! 3 i0 i1 i2     (nf rows, indices already 0-based)
//! ```
//!
//! The edge count `ne` is read and ignored. Only triangulated input is
//! accepted; a face row with another vertex count fails the load.

use std::fs;
use std::path::Path;

use log::debug;
use nalgebra::Point3;

use crate::error::MeshError;
use crate::geometry::{Triangle, TriangleMesh};
use crate::normals;
use crate::parse;

pub fn from_path(path: impl AsRef<Path>) -> Result<TriangleMesh, MeshError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let mesh = parse(&text)?;
    debug!(
        "loaded OFF {}: {} vertices, {} triangles",
        path.display(),
        mesh.points().len(),
        mesh.triangles().len()
    );
    Ok(mesh)
}

pub fn parse(text: &str) -> Result<TriangleMesh, MeshError> {
    let mut lines = parse::meaningful_lines(text);

    let (header_line, header) = lines.next().ok_or(MeshError::UnexpectedEof {
        record: "OFF header",
    })?;
    let token = header.split_whitespace().next().unwrap_or("");
    if token != "OFF" {
        return Err(MeshError::FormatMismatch {
            expected: "OFF",
            found: token.to_owned(),
        });
    }

    // counts either follow on the header line or sit on the next one
    let after_token = header["OFF".len()..].trim();
    let (line, counts) = if after_token.is_empty() {
        lines.next().ok_or(MeshError::UnexpectedEof {
            record: "header counts",
        })?
    } else {
        (header_line, after_token)
    };
    let (rest, (nv, nf, _ne)) = parse::int3(counts).map_err(|_| MeshError::Parse {
        line,
        record: "header counts",
    })?;
    if !parse::line_done(rest) {
        return Err(MeshError::Parse {
            line,
            record: "header counts",
        });
    }
    if nv <= 0 || nf <= 0 {
        return Err(MeshError::InvalidHeader {
            vertices: nv,
            faces: nf,
        });
    }

    let mut points = Vec::with_capacity(nv as usize);
    for _ in 0..nv {
        let (line, row) = lines
            .next()
            .ok_or(MeshError::UnexpectedEof { record: "vertex" })?;
        let (rest, (x, y, z)) = parse::vec3(row).map_err(|_| MeshError::Parse {
            line,
            record: "vertex",
        })?;
        if !parse::line_done(rest) {
            return Err(MeshError::Parse {
                line,
                record: "vertex",
            });
        }
        points.push(Point3::new(x, y, z));
    }

    let mut triangles: Vec<Triangle> = Vec::with_capacity(nf as usize);
    for _ in 0..nf {
        let (line, row) = lines
            .next()
            .ok_or(MeshError::UnexpectedEof { record: "face" })?;
        let (rest, corner_count) = parse::uint(row).map_err(|_| MeshError::Parse {
            line,
            record: "face",
        })?;
        if corner_count != 3 {
            return Err(MeshError::MalformedFace {
                line,
                reason: format!("face with {corner_count} vertices, only triangles are supported"),
            });
        }
        let (rest, (i0, i1, i2)) = parse::index3(rest).map_err(|_| MeshError::Parse {
            line,
            record: "face",
        })?;
        if !parse::line_done(rest) {
            return Err(MeshError::Parse {
                line,
                record: "face",
            });
        }

        let triangle = [i0, i1, i2];
        for &index in &triangle {
            if index >= points.len() {
                return Err(MeshError::IndexOutOfRange {
                    line,
                    index,
                    len: points.len(),
                });
            }
        }
        triangles.push(triangle);
    }

    let normals = normals::smooth_normals(&points, &triangles);
    Ok(TriangleMesh::from_parts(points, triangles, normals, Vec::new()))
}
