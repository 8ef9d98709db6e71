//! LSA laser-scan loader.
//!
//! Only the header (`LSA nv nf ne baseline`) is understood. The body
//! stores per-vertex angular coordinates against a scanner baseline and
//! its encoding is unspecified, so a load always fails with
//! [`MeshError::Unsupported`] after validating the header. Failing fast
//! beats handing the renderer uninitialized geometry.

use std::fs;
use std::path::Path;

use nom::{
    bytes::complete::tag,
    character::complete::multispace0,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::MeshError;
use crate::geometry::TriangleMesh;
use crate::parse;

pub fn from_path(path: impl AsRef<Path>) -> Result<TriangleMesh, MeshError> {
    let text = fs::read_to_string(path.as_ref())?;
    parse(&text)
}

pub fn parse(text: &str) -> Result<TriangleMesh, MeshError> {
    let rest = match header_tag(text) {
        Ok((rest, _)) => rest,
        Err(_) => {
            return Err(MeshError::FormatMismatch {
                expected: "LSA",
                found: text.split_whitespace().next().unwrap_or("").to_owned(),
            })
        }
    };

    let (rest, (nv, nf, _ne)) = parse::int3(rest).map_err(|_| MeshError::Parse {
        line: 1,
        record: "header counts",
    })?;
    baseline(rest).map_err(|_| MeshError::Parse {
        line: 1,
        record: "baseline",
    })?;

    if nv <= 0 || nf <= 0 {
        return Err(MeshError::InvalidHeader {
            vertices: nv,
            faces: nf,
        });
    }

    Err(MeshError::Unsupported {
        format: "LSA",
        reason: "the angular vertex encoding is not implemented",
    })
}

fn header_tag(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, tag("LSA"))(input)
}

fn baseline(input: &str) -> IResult<&str, f32> {
    preceded(multispace0, float)(input)
}
