//! MeshView terminal viewer.
//!
//! Loads an OFF/OBJ/LSA mesh and renders one shaded frame to stdout.
//!
//! Usage: meshview <mesh-file> [--corners] [--flip] [--recompute-normals]
//!   --corners            load OBJ with per-corner vertex duplication
//!   --flip               flip all normals after loading
//!   --recompute-normals  ignore `vn` records and recompute smooth normals

use std::io::{stdout, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use crossterm::terminal;
use meshview_core::{obj, ObjOptions, ObjTopology, TriangleMesh};
use meshview_terminal::{AsciiRenderer, Viewport};
use nalgebra::{Matrix4, Vector3};

fn main() -> Result<()> {
    env_logger::init();

    let mut path = None;
    let mut corners = false;
    let mut flip = false;
    let mut recompute = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--corners" => corners = true,
            "--flip" => flip = true,
            "--recompute-normals" => recompute = true,
            _ if arg.starts_with("--") => bail!("unknown option: {arg}"),
            _ => path = Some(arg),
        }
    }
    let Some(path) = path else {
        bail!("usage: meshview <mesh-file> [--corners] [--flip] [--recompute-normals]");
    };

    let mut mesh = load_mesh(&path, corners, recompute)?;
    if flip {
        mesh.flip_normals();
    }
    log::info!(
        "{path}: {} vertices, {} triangles",
        mesh.points().len(),
        mesh.triangles().len()
    );

    let (width, height) = terminal::size().unwrap_or((80, 24));
    let viewport = Viewport::new(width as u32, height as u32);
    let mut renderer = AsciiRenderer::new(width as usize, height as usize);

    // slight tilt so flat-on meshes still show some shape
    let model = Matrix4::new_rotation(Vector3::new(0.4, 0.6, 0.0));
    renderer.render_mesh(&mesh, &model, &viewport);

    let mut out = stdout();
    renderer.draw(&mut out)?;
    out.flush()?;
    Ok(())
}

/// Loads the mesh, routing through the OBJ loader only when the OBJ-only
/// flags are set — and rejecting those flags for any other extension.
fn load_mesh(path: &str, corners: bool, recompute: bool) -> Result<TriangleMesh> {
    let is_obj = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("obj"));

    if (corners || recompute) && !is_obj {
        bail!("--corners and --recompute-normals only apply to .obj files: {path}");
    }

    if corners || recompute {
        let options = ObjOptions {
            topology: if corners {
                ObjTopology::CornerDuplicating
            } else {
                ObjTopology::IndexSharing
            },
            preserve_loaded_normals: !recompute,
        };
        obj::from_path_with(path, options).with_context(|| format!("loading {path}"))
    } else {
        meshview_core::load_path(path).with_context(|| format!("loading {path}"))
    }
}
