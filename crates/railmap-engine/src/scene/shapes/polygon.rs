use crate::coords::Vec2;
use crate::paint::{Color, Paint};
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Filled polygon draw payload, vertices in logical pixels.
///
/// Renderers triangulate as a fan around the first vertex, so the outline must be
/// convex (train car outlines, with or without a direction arrow, always are).
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonCmd {
    pub points: Vec<Vec2>,
    pub paint: Paint,
}

impl PolygonCmd {
    #[inline]
    pub fn new(points: Vec<Vec2>, paint: Paint) -> Self {
        Self { points, paint }
    }

    /// Number of triangles a fan over this outline produces.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.points.len().saturating_sub(2)
    }
}

impl DrawList {
    /// Records a polygon draw command. Outlines with fewer than three vertices are dropped.
    #[inline]
    pub fn push_polygon(&mut self, z: ZIndex, points: Vec<Vec2>, paint: Paint) {
        if points.len() < 3 {
            return;
        }
        self.push(z, DrawCmd::Polygon(PolygonCmd::new(points, paint)));
    }

    /// Records a solid polygon draw command.
    #[inline]
    pub fn push_solid_polygon(&mut self, z: ZIndex, points: Vec<Vec2>, color: Color) {
        self.push_polygon(z, points, Paint::Solid(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_outline_is_dropped() {
        let mut dl = DrawList::new();
        dl.push_polygon(ZIndex::default(), vec![Vec2::zero(), Vec2::new(1.0, 0.0)], Paint::None);
        assert!(dl.items().is_empty());
    }

    #[test]
    fn pentagon_has_three_triangles() {
        let pts = vec![Vec2::zero(); 5];
        assert_eq!(PolygonCmd::new(pts, Paint::None).triangle_count(), 3);
    }
}
