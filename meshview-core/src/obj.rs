//! Wavefront OBJ loader (subset: `v`, `vn`, `vt`, `f`).
//!
//! Face corners are `i[/j[/k]]` with 1-based indices; empty sub-fields
//! (`1//3`) are tolerated. Unknown keywords and comments are skipped.
//! Out-of-range or non-positive indices fail the whole load rather than
//! skipping the face, so a malformed file never produces a half-built
//! mesh or an out-of-bounds lookup.

use std::fs;
use std::path::Path;

use log::debug;
use nalgebra::{Point2, Point3, Vector3};

use crate::error::MeshError;
use crate::geometry::{Triangle, TriangleMesh};
use crate::normals;
use crate::parse::{self, FaceRef};

/// Output topology of the OBJ loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjTopology {
    /// Faces index into the shared vertex list as read; texture and
    /// normal sub-indices are ignored and smooth normals are computed
    /// per vertex after the scan.
    #[default]
    IndexSharing,
    /// Every face corner appends its own vertex/normal/texture entry,
    /// duplicating geometrically shared vertices. Required when one
    /// vertex maps to different UVs on different faces.
    CornerDuplicating,
}

#[derive(Debug, Clone, Copy)]
pub struct ObjOptions {
    pub topology: ObjTopology,
    /// Keep `vn` data from the file when every corner references a
    /// normal; otherwise recompute as a fallback. Only meaningful for
    /// [`ObjTopology::CornerDuplicating`].
    pub preserve_loaded_normals: bool,
}

impl Default for ObjOptions {
    fn default() -> Self {
        Self {
            topology: ObjTopology::IndexSharing,
            preserve_loaded_normals: true,
        }
    }
}

pub fn from_path(path: impl AsRef<Path>) -> Result<TriangleMesh, MeshError> {
    from_path_with(path, ObjOptions::default())
}

pub fn from_path_with(
    path: impl AsRef<Path>,
    options: ObjOptions,
) -> Result<TriangleMesh, MeshError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let mesh = parse_with(&text, options)?;
    debug!(
        "loaded OBJ {} ({:?}): {} vertices, {} triangles",
        path.display(),
        options.topology,
        mesh.points().len(),
        mesh.triangles().len()
    );
    Ok(mesh)
}

pub fn parse(text: &str) -> Result<TriangleMesh, MeshError> {
    parse_with(text, ObjOptions::default())
}

pub fn parse_with(text: &str, options: ObjOptions) -> Result<TriangleMesh, MeshError> {
    match options.topology {
        ObjTopology::IndexSharing => parse_shared(text),
        ObjTopology::CornerDuplicating => parse_corners(text, options.preserve_loaded_normals),
    }
}

fn parse_shared(text: &str) -> Result<TriangleMesh, MeshError> {
    let mut points: Vec<Point3<f32>> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();

    for (line, row) in parse::meaningful_lines(text) {
        let (keyword, rest) = split_keyword(row);
        match keyword {
            "v" => {
                let (x, y, z) = read_vec3(rest, line, "v", true)?;
                points.push(Point3::new(x, y, z));
            }
            // read but unused in this topology
            "vn" => {
                read_vec3(rest, line, "vn", false)?;
            }
            "vt" => {
                read_vec2(rest, line)?;
            }
            "f" => {
                let refs = face_refs(rest, line)?;
                let mut triangle = [0usize; 3];
                for (slot, corner) in triangle.iter_mut().zip(&refs) {
                    *slot = resolve_index(corner.vertex, points.len(), line)?;
                }
                triangles.push(triangle);
            }
            _ => {}
        }
    }

    let normals = normals::smooth_normals(&points, &triangles);
    Ok(TriangleMesh::from_parts(points, triangles, normals, Vec::new()))
}

fn parse_corners(text: &str, preserve_loaded_normals: bool) -> Result<TriangleMesh, MeshError> {
    let mut local_points: Vec<Point3<f32>> = Vec::new();
    let mut local_normals: Vec<Vector3<f32>> = Vec::new();
    let mut local_tex: Vec<Point2<f32>> = Vec::new();

    let mut points: Vec<Point3<f32>> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();
    let mut normals: Vec<Vector3<f32>> = Vec::new();
    // None marks corners whose face reference carried no `vt` sub-index
    let mut tex_coords: Vec<Option<Point2<f32>>> = Vec::new();
    let mut missing_normal = false;
    let mut any_tex = false;

    for (line, row) in parse::meaningful_lines(text) {
        let (keyword, rest) = split_keyword(row);
        match keyword {
            "v" => {
                let (x, y, z) = read_vec3(rest, line, "v", true)?;
                local_points.push(Point3::new(x, y, z));
            }
            "vn" => {
                let (x, y, z) = read_vec3(rest, line, "vn", false)?;
                local_normals.push(Vector3::new(x, y, z));
            }
            "vt" => {
                let (u, v) = read_vec2(rest, line)?;
                local_tex.push(Point2::new(u, v));
            }
            "f" => {
                let refs = face_refs(rest, line)?;
                let base = points.len();
                for corner in &refs {
                    let vi = resolve_index(corner.vertex, local_points.len(), line)?;
                    points.push(local_points[vi]);

                    match corner.normal {
                        Some(raw) => {
                            let ni = resolve_index(raw, local_normals.len(), line)?;
                            normals.push(local_normals[ni]);
                        }
                        None => {
                            normals.push(Vector3::zeros());
                            missing_normal = true;
                        }
                    }

                    match corner.tex {
                        Some(raw) => {
                            let ti = resolve_index(raw, local_tex.len(), line)?;
                            tex_coords.push(Some(local_tex[ti]));
                            any_tex = true;
                        }
                        None => tex_coords.push(None),
                    }
                }
                triangles.push([base, base + 1, base + 2]);
            }
            _ => {}
        }
    }

    if !preserve_loaded_normals || missing_normal {
        normals = normals::smooth_normals(&points, &triangles);
    }
    if !any_tex {
        tex_coords.clear();
    }

    Ok(TriangleMesh::from_parts(points, triangles, normals, tex_coords))
}

fn split_keyword(row: &str) -> (&str, &str) {
    row.split_once(char::is_whitespace).unwrap_or((row, ""))
}

/// Reads a coordinate triple and requires the rest of the line to be
/// blank. `optional_w` admits the OBJ `v x y z [w]` form.
fn read_vec3(
    rest: &str,
    line: usize,
    record: &'static str,
    optional_w: bool,
) -> Result<(f32, f32, f32), MeshError> {
    let err = || MeshError::Parse { line, record };
    let (rest, triple) = parse::vec3(rest).map_err(|_| err())?;
    let rest = if optional_w {
        parse::opt_float(rest).map_err(|_| err())?.0
    } else {
        rest
    };
    if !parse::line_done(rest) {
        return Err(err());
    }
    Ok(triple)
}

/// Reads a `vt u v [w]` pair, tolerating the optional third component.
fn read_vec2(rest: &str, line: usize) -> Result<(f32, f32), MeshError> {
    let err = || MeshError::Parse { line, record: "vt" };
    let (rest, pair) = parse::vec2(rest).map_err(|_| err())?;
    let (rest, _) = parse::opt_float(rest).map_err(|_| err())?;
    if !parse::line_done(rest) {
        return Err(err());
    }
    Ok(pair)
}

fn face_refs(rest: &str, line: usize) -> Result<[FaceRef; 3], MeshError> {
    let mut refs = Vec::new();
    let mut input = rest.trim_start();
    while !input.is_empty() {
        let (next, corner) =
            parse::face_ref(input).map_err(|_| MeshError::Parse { line, record: "f" })?;
        refs.push(corner);
        input = next.trim_start();
    }

    let count = refs.len();
    refs.try_into().map_err(|_| MeshError::MalformedFace {
        line,
        reason: format!("face with {count} corners, only triangles are supported"),
    })
}

/// Translates a 1-based OBJ index against the entries seen so far.
fn resolve_index(raw: i64, len: usize, line: usize) -> Result<usize, MeshError> {
    if raw <= 0 {
        return Err(MeshError::MalformedFace {
            line,
            reason: format!("non-positive index {raw}"),
        });
    }
    let index = (raw - 1) as usize;
    if index >= len {
        return Err(MeshError::IndexOutOfRange { line, index, len });
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    // a flat unit quad split into two triangles along the diagonal
    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3
f 1 3 4
";

    #[test]
    fn test_shared_quad_keeps_four_vertices() {
        let mesh = parse(QUAD).unwrap();
        assert_eq!(mesh.points().len(), 4);
        assert_eq!(mesh.triangles(), &[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.normals().len(), 4);
    }

    #[test]
    fn test_shared_edge_normals_are_averaged_and_unit() {
        let mesh = parse(QUAD).unwrap();
        let n = mesh.normals();
        // coplanar faces: every vertex ends up with the same unit normal
        for normal in n {
            assert!((normal - n[0]).norm() < 1e-6);
            assert!((normal.norm() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_shared_topology_ignores_sub_indices() {
        let input = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1
";
        let mesh = parse(input).unwrap();
        assert_eq!(mesh.points().len(), 3);
        assert!(mesh.tex_coords().is_empty());
    }

    #[test]
    fn test_corner_duplication_splits_shared_vertices() {
        let options = ObjOptions {
            topology: ObjTopology::CornerDuplicating,
            ..ObjOptions::default()
        };
        let mesh = parse_with(QUAD, options).unwrap();
        assert_eq!(mesh.points().len(), 6);
        assert_eq!(mesh.triangles(), &[[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mesh.normals().len(), 6);
    }

    #[test]
    fn test_corner_duplication_resolves_per_corner_uvs() {
        let input = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
f 1/1 2/2 3/3
";
        let options = ObjOptions {
            topology: ObjTopology::CornerDuplicating,
            ..ObjOptions::default()
        };
        let mesh = parse_with(input, options).unwrap();
        assert_eq!(mesh.tex_coords().len(), 3);
        assert_eq!(mesh.tex_coords()[1], Some(Point2::new(1.0, 0.0)));
    }

    #[test]
    fn test_corner_without_vt_has_no_uv() {
        // only the first corner references a texture coordinate; the
        // other two must not be given one
        let input = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0.5 0.5
f 1/1 2 3
";
        let options = ObjOptions {
            topology: ObjTopology::CornerDuplicating,
            ..ObjOptions::default()
        };
        let mesh = parse_with(input, options).unwrap();

        assert_eq!(mesh.tex_coords()[0], Some(Point2::new(0.5, 0.5)));
        assert_eq!(mesh.tex_coords()[1], None);
        assert_eq!(mesh.tex_coords()[2], None);

        let [a, b, c] = mesh.corners().next().unwrap();
        assert_eq!(a.tex, Some(Point2::new(0.5, 0.5)));
        assert_eq!(b.tex, None);
        assert_eq!(c.tex, None);
    }

    #[test]
    fn test_loaded_normals_are_preserved_by_default() {
        let input = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 1 0 0
f 1//1 2//1 3//1
";
        let options = ObjOptions {
            topology: ObjTopology::CornerDuplicating,
            ..ObjOptions::default()
        };
        let mesh = parse_with(input, options).unwrap();
        // the geometric normal would be +Z; the file says +X
        for n in mesh.normals() {
            assert_eq!(*n, Vector3::new(1.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_recompute_overrides_loaded_normals() {
        let input = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 1 0 0
f 1//1 2//1 3//1
";
        let options = ObjOptions {
            topology: ObjTopology::CornerDuplicating,
            preserve_loaded_normals: false,
        };
        let mesh = parse_with(input, options).unwrap();
        for n in mesh.normals() {
            assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
        }
    }

    #[test]
    fn test_partially_missing_normals_fall_back_to_computation() {
        let input = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 1 0 0
f 1//1 2 3//1
";
        let options = ObjOptions {
            topology: ObjTopology::CornerDuplicating,
            ..ObjOptions::default()
        };
        let mesh = parse_with(input, options).unwrap();
        for n in mesh.normals() {
            assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
        }
    }

    #[test]
    fn test_out_of_range_face_index_fails_the_load() {
        let input = "v 0 0 0\nv 1 0 0\nf 1 2 3\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange { index: 2, len: 2, .. }
        ));
    }

    #[test]
    fn test_non_positive_index_is_malformed() {
        let err = parse("v 0 0 0\nf 0 1 1\n").unwrap_err();
        assert!(matches!(err, MeshError::MalformedFace { .. }));
    }

    #[test]
    fn test_quad_face_is_rejected() {
        let input = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, MeshError::MalformedFace { line: 5, .. }));
    }

    #[test]
    fn test_unknown_keywords_are_skipped() {
        let input = "\
mtllib scene.mtl
o triangle
usemtl stone
v 0 0 0
v 1 0 0
v 0 1 0
s off
f 1 2 3
";
        let mesh = parse(input).unwrap();
        assert_eq!(mesh.triangles().len(), 1);
    }

    #[test]
    fn test_malformed_float_reports_parse_error() {
        let err = parse("v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 1, record: "v" }));
    }

    #[test]
    fn test_attached_trailing_garbage_is_rejected() {
        let err = parse("v 1 2 3x\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 1, record: "v" }));

        let err = parse("v 0 0 0\nvn 0 0 1 1\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 2, record: "vn" }));
    }

    #[test]
    fn test_optional_extra_components_are_accepted() {
        // `v` may carry a w coordinate, `vt` a third component
        let input = "\
v 0 0 0 1.0
v 1 0 0 1.0
v 0 1 0 1.0
vt 0 0 0
f 1 2 3
";
        let mesh = parse(input).unwrap();
        assert_eq!(mesh.points().len(), 3);
        assert_eq!(mesh.triangles().len(), 1);
    }
}
