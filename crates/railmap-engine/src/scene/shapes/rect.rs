use crate::coords::Rect;
use crate::paint::{Color, Paint};
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Rectangle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub paint: Paint,
}

impl RectCmd {
    #[inline]
    pub fn new(rect: Rect, paint: Paint) -> Self {
        Self { rect, paint }
    }
}

impl DrawList {
    /// Records a rectangle draw command.
    #[inline]
    pub fn push_rect(&mut self, z: ZIndex, rect: Rect, paint: Paint) {
        self.push(z, DrawCmd::Rect(RectCmd::new(rect, paint)));
    }

    /// Records a solid rectangle draw command.
    #[inline]
    pub fn push_solid_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push_rect(z, rect, Paint::Solid(color));
    }

    /// Records the outline of `rect` as four solid edge rectangles of `width`,
    /// drawn inside the rectangle.
    pub fn push_rect_outline(&mut self, z: ZIndex, rect: Rect, width: f32, color: Color) {
        let r = rect.normalized();
        let w = width.min(r.size.x * 0.5).min(r.size.y * 0.5).max(0.0);
        if w <= 0.0 {
            return;
        }

        let (x, y, rw, rh) = (r.origin.x, r.origin.y, r.size.x, r.size.y);
        self.push_solid_rect(z, Rect::new(x, y, rw, w), color);
        self.push_solid_rect(z, Rect::new(x, y + rh - w, rw, w), color);
        self.push_solid_rect(z, Rect::new(x, y + w, w, rh - 2.0 * w), color);
        self.push_solid_rect(z, Rect::new(x + rw - w, y + w, w, rh - 2.0 * w), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_emits_four_edges() {
        let mut dl = DrawList::new();
        dl.push_rect_outline(ZIndex::new(1), Rect::new(0.0, 0.0, 10.0, 6.0), 1.0, Color::transparent());
        assert_eq!(dl.items().len(), 4);
    }

    #[test]
    fn outline_of_flat_rect_is_skipped() {
        let mut dl = DrawList::new();
        dl.push_rect_outline(ZIndex::new(1), Rect::new(0.0, 0.0, 10.0, 0.0), 1.0, Color::transparent());
        assert!(dl.items().is_empty());
    }
}