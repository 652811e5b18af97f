//! Rendering module
//!
//! `scene` turns game state into draw commands, `shapes` tessellates them and
//! `pipeline` pushes the triangles through WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::{DrawCmd, Painter};
pub use shapes::tessellate;
pub use vertex::Vertex;
