//! Shared nom helpers for the ASCII mesh formats.

use nom::{
    character::complete::{char, i64 as int_tok, multispace0, multispace1, u64 as uint_tok},
    combinator::opt,
    number::complete::float,
    sequence::preceded,
    IResult,
};

/// Meaningful lines of an ASCII mesh file. Blank lines and `#` comments are
/// skipped; line numbers are 1-based for error reporting.
pub(crate) fn meaningful_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(i, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            None
        } else {
            Some((i + 1, line))
        }
    })
}

/// True when nothing but whitespace or a trailing comment is left of a
/// record line. Attached garbage such as `v 1 2 3x` leaves `x` behind
/// and must be reported as a parse error by the caller.
pub(crate) fn line_done(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.is_empty() || rest.starts_with('#')
}

/// Consumes one optional extra float, for records with an optional
/// trailing component (`v x y z [w]`, `vt u v [w]`).
pub(crate) fn opt_float(input: &str) -> IResult<&str, Option<f32>> {
    opt(preceded(multispace1, float))(input)
}

pub(crate) fn vec3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, (x, y, z)))
}

pub(crate) fn vec2(input: &str) -> IResult<&str, (f32, f32)> {
    let (input, _) = multispace0(input)?;
    let (input, u) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, v) = float(input)?;
    Ok((input, (u, v)))
}

pub(crate) fn int3(input: &str) -> IResult<&str, (i64, i64, i64)> {
    let (input, _) = multispace0(input)?;
    let (input, a) = int_tok(input)?;
    let (input, _) = multispace1(input)?;
    let (input, b) = int_tok(input)?;
    let (input, _) = multispace1(input)?;
    let (input, c) = int_tok(input)?;
    Ok((input, (a, b, c)))
}

pub(crate) fn uint(input: &str) -> IResult<&str, u64> {
    preceded(multispace0, uint_tok)(input)
}

pub(crate) fn index3(input: &str) -> IResult<&str, (usize, usize, usize)> {
    let (input, _) = multispace0(input)?;
    let (input, a) = uint_tok(input)?;
    let (input, _) = multispace1(input)?;
    let (input, b) = uint_tok(input)?;
    let (input, _) = multispace1(input)?;
    let (input, c) = uint_tok(input)?;
    Ok((input, (a as usize, b as usize, c as usize)))
}

/// One corner reference of an OBJ face line: `v[/vt[/vn]]`, where the
/// slash-separated sub-indices may be empty (`1//3`) or absent entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FaceRef {
    pub vertex: i64,
    pub tex: Option<i64>,
    pub normal: Option<i64>,
}

pub(crate) fn face_ref(input: &str) -> IResult<&str, FaceRef> {
    let (input, vertex) = int_tok(input)?;
    let (input, tex) = opt(preceded(char('/'), opt(int_tok)))(input)?;
    let (input, normal) = opt(preceded(char('/'), opt(int_tok)))(input)?;
    Ok((
        input,
        FaceRef {
            vertex,
            tex: tex.flatten(),
            normal: normal.flatten(),
        },
    ))
}
