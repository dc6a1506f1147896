use crate::scene::shapes::polygon::PolygonCmd;
use crate::scene::shapes::rect::RectCmd;

/// A shape recorded into a [`DrawList`](super::DrawList).
///
/// `render::FillRenderer` must handle every variant.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Polygon(PolygonCmd),
}
