//! Coordinate and geometry types shared across engine renderers and the map layer.
//!
//! Three spaces are in play:
//! - world space (`Point3`): simulation positions, y is elevation
//! - map space (`LatLng`, `GeoRect`, `GeoBounds`): output of a map projection
//! - logical pixels (`Vec2`, `Rect`): origin top-left, +X right, +Y down
//!
//! Renderers convert logical pixels to NDC in shaders using a viewport uniform.

mod geo;
mod point3;
mod rect;
mod vec2;
mod viewport;

pub use geo::{GeoBounds, GeoRect, LatLng};
pub use point3::{directional_vector, perpendicular_vector, Point3};
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
