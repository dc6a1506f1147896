//! The event loop and its single window, wired to the GPU layer.

mod runtime;
mod translate;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
