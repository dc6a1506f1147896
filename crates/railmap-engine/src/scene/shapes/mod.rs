pub(crate) mod polygon;
pub(crate) mod rect;

pub use polygon::PolygonCmd;
pub use rect::RectCmd;
