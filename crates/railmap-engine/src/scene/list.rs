use crate::coords::Rect;

use super::{DrawCmd, ZIndex};

/// One recorded command with its layer and clip.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub z: ZIndex,
    /// Recording position; breaks ties within a layer.
    pub seq: u32,
    pub cmd: DrawCmd,
    /// Scissor in logical pixels, `None` for the whole target.
    pub clip_rect: Option<Rect>,
}

/// Commands recorded for one frame, painted back to front by `(z, seq)`.
///
/// Commands pushed between [`push_clip`](Self::push_clip) and
/// [`pop_clip`](Self::pop_clip) carry that clip, intersected with any enclosing
/// one. Buffers keep their capacity across [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    clips: Vec<Rect>,
    order: Vec<usize>,
    order_stale: bool,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.clips.clear();
        self.order.clear();
        self.order_stale = false;
    }

    /// Items in recording order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        self.items.push(DrawItem {
            z,
            seq: self.items.len() as u32,
            cmd,
            clip_rect: self.clips.last().copied(),
        });
        self.order_stale = true;
    }

    /// Clips everything pushed until the matching [`pop_clip`](Self::pop_clip).
    /// A clip disjoint from its parent clips everything away.
    pub fn push_clip(&mut self, rect: Rect) {
        let clip = match self.clips.last() {
            Some(parent) => parent.intersect(rect).unwrap_or_default(),
            None => rect,
        };
        self.clips.push(clip);
    }

    pub fn pop_clip(&mut self) {
        let popped = self.clips.pop();
        debug_assert!(popped.is_some(), "pop_clip without push_clip");
    }

    /// Items in paint order, back to front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.order_stale || self.order.len() != self.items.len() {
            let items = &self.items;
            self.order.clear();
            self.order.extend(0..items.len());
            self.order.sort_by_key(|&i| (items[i].z, items[i].seq));
            self.order_stale = false;
        }
        self.order.iter().map(|&i| &self.items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Paint;
    use crate::scene::shapes::RectCmd;

    fn rect_cmd(x: f32) -> DrawCmd {
        DrawCmd::Rect(RectCmd::new(Rect::new(x, 0.0, 1.0, 1.0), Paint::None))
    }

    fn xs(dl: &mut DrawList) -> Vec<f32> {
        dl.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Rect(r) => r.rect.origin.x,
                DrawCmd::Polygon(_) => f32::NAN,
            })
            .collect()
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut dl = DrawList::new();
        dl.push(ZIndex::DEBUG, rect_cmd(0.0));
        dl.push(ZIndex::OVERLAY, rect_cmd(1.0));
        dl.push(ZIndex::BACKDROP, rect_cmd(2.0));
        dl.push(ZIndex::OVERLAY, rect_cmd(3.0));
        assert_eq!(xs(&mut dl), vec![2.0, 1.0, 3.0, 0.0]);
    }

    #[test]
    fn order_is_rebuilt_after_more_pushes() {
        let mut dl = DrawList::new();
        dl.push(ZIndex::OVERLAY, rect_cmd(1.0));
        assert_eq!(xs(&mut dl), vec![1.0]);
        dl.push(ZIndex::BACKDROP, rect_cmd(0.0));
        assert_eq!(xs(&mut dl), vec![0.0, 1.0]);
    }

    #[test]
    fn clear_resets_items() {
        let mut dl = DrawList::new();
        dl.push(ZIndex::OVERLAY, rect_cmd(0.0));
        dl.clear();
        assert!(dl.items().is_empty());
        assert!(xs(&mut dl).is_empty());
    }

    // ── clipping ──────────────────────────────────────────────────────────

    #[test]
    fn nested_clips_intersect() {
        let mut dl = DrawList::new();
        dl.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        dl.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        dl.push(ZIndex::OVERLAY, rect_cmd(0.0));
        dl.pop_clip();
        dl.pop_clip();
        dl.push(ZIndex::OVERLAY, rect_cmd(1.0));

        assert_eq!(dl.items()[0].clip_rect, Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert_eq!(dl.items()[1].clip_rect, None);
    }

    #[test]
    fn disjoint_clip_is_empty() {
        let mut dl = DrawList::new();
        dl.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        dl.push_clip(Rect::new(20.0, 20.0, 5.0, 5.0));
        dl.push(ZIndex::OVERLAY, rect_cmd(0.0));
        assert_eq!(dl.items()[0].clip_rect, Some(Rect::default()));
    }
}
