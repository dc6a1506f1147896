use crate::coords::{GeoBounds, GeoRect, LatLng};

use super::primitive::{Primitive, Style};

/// View box a fresh surface starts with, in path units.
const INITIAL_VIEW_BOX: GeoRect = GeoRect::new(0.0, 0.0, 200.0, 200.0);

/// One visible/hidden primitive pair.
///
/// The hidden primitive mirrors the geometry the bounding box should be computed
/// from; it is created at zero opacity and never styled.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub visible: Primitive,
    pub hidden: Primitive,
}

impl Slot {
    fn new() -> Self {
        Self {
            visible: Primitive::new(Style::default()),
            hidden: Primitive::new(Style::hidden()),
        }
    }

    /// Empties both paths. The primitives (and their ids) stay in place.
    pub fn clear(&mut self) {
        self.visible.clear_path();
        self.hidden.clear_path();
    }
}

/// Persistent overlay placed on the map.
///
/// Holds an append-only arena of [`Slot`]s addressed by index. Slots are created on
/// demand and never removed, so a primitive keeps its identity for the lifetime of
/// the surface.
///
/// `view_box` and `transform_origin` are placement output for hosts that scale or
/// rotate the overlay around its centre; the studio viewer draws paths directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    slots: Vec<Slot>,
    bounds: GeoBounds,
    view_box: GeoRect,
    transform_origin: LatLng,
}

impl Surface {
    /// Creates an empty surface anchored at `bounds`.
    pub fn new(bounds: GeoBounds) -> Self {
        Self {
            slots: Vec::new(),
            bounds,
            view_box: INITIAL_VIEW_BOX,
            transform_origin: LatLng::default(),
        }
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[inline]
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Returns the slot at `index`, appending empty slots up to and including it.
    pub fn ensure_slot(&mut self, index: usize) -> &mut Slot {
        while self.slots.len() <= index {
            self.slots.push(Slot::new());
        }
        &mut self.slots[index]
    }

    /// Clears every slot at `from` and beyond. Returns how many slots were cleared.
    pub fn clear_slots_from(&mut self, from: usize) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut().skip(from) {
            if !slot.visible.path().is_empty() || !slot.hidden.path().is_empty() {
                cleared += 1;
            }
            slot.clear();
        }
        cleared
    }

    /// Union box of the hidden primitives' paths.
    pub fn hidden_bbox(&self) -> Option<GeoRect> {
        self.slots
            .iter()
            .filter_map(|s| s.hidden.path().bbox())
            .fold(None, GeoRect::union_opt)
    }

    /// Union box of every primitive's path, visible and hidden.
    pub fn content_bbox(&self) -> Option<GeoRect> {
        self.slots
            .iter()
            .flat_map(|s| [s.visible.path().bbox(), s.hidden.path().bbox()])
            .flatten()
            .fold(None, GeoRect::union_opt)
    }

    #[inline]
    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    #[inline]
    pub fn set_bounds(&mut self, bounds: GeoBounds) {
        self.bounds = bounds;
    }

    #[inline]
    pub fn view_box(&self) -> GeoRect {
        self.view_box
    }

    #[inline]
    pub fn set_view_box(&mut self, view_box: GeoRect) {
        self.view_box = view_box;
    }

    /// Pivot used for rotating the surface content.
    #[inline]
    pub fn transform_origin(&self) -> LatLng {
        self.transform_origin
    }

    #[inline]
    pub fn set_transform_origin(&mut self, origin: LatLng) {
        self.transform_origin = origin;
    }
}
