//! What the runtime hands to an application: the [`App`] callbacks and the
//! per-frame [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
