//! WebGPU rendering module
//!
//! Scenes are built on the CPU as coloured triangles in canvas pixels and
//! drawn with a single pass-through pipeline.

pub mod color;
pub mod palette;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use color::Color;
pub use palette::{ColorRole, Palette};
pub use pipeline::{RenderError, RenderState};
pub use scene::{RenderView, SceneBuilder};
pub use vertex::Vertex;
