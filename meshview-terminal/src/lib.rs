//! Terminal-based ASCII renderer for triangle meshes.

pub mod renderer;
pub mod view;

pub use renderer::AsciiRenderer;
pub use view::Viewport;
