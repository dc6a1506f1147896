//! Paint model shared between the map layer and renderers.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - paint sources for filling geometry
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::{Color, ColorParseError};

/// Paint source for filling geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Paint {
    /// No fill. The geometry still exists (and still has bounds), it just draws nothing.
    #[default]
    None,
    Solid(Color),
}

impl Paint {
    /// Effective fill color after applying `opacity`, or `None` when nothing would be visible.
    #[inline]
    pub fn resolve(&self, opacity: f32) -> Option<Color> {
        match self {
            Paint::None => None,
            Paint::Solid(c) => {
                let c = c.with_opacity(opacity);
                (c.a > 0.0).then_some(c)
            }
        }
    }
}
