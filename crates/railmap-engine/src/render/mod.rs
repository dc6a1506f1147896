//! GPU rendering.
//!
//! Renderers consume a `scene::DrawList` and own their wgpu resources. Geometry
//! arrives in logical pixels (top-left origin, +Y down); the vertex shader maps it
//! to clip space through a viewport uniform.

mod ctx;
mod fill;

pub use ctx::{RenderCtx, RenderTarget};
pub use fill::FillRenderer;
