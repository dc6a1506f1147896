use super::Vec2;

/// Screen rectangle in logical pixels, `origin` at the top-left.
///
/// A negative `size` is allowed in transit; [`Rect::normalized`] flips it back.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    /// Spans two opposite corners given in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    pub fn normalized(self) -> Self {
        Self::from_corners(self.min(), self.max())
    }

    /// Moves every edge outwards by `amount` (inwards when negative).
    pub fn inflate(self, amount: f32) -> Self {
        let r = self.normalized();
        let d = Vec2::new(amount, amount);
        Self { origin: r.origin - d, size: r.size + d * 2.0 }
    }

    /// `min` edges are inside, `max` edges are not.
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        let (lo, hi) = (r.min(), r.max());
        (lo.x..hi.x).contains(&p.x) && (lo.y..hi.y).contains(&p.y)
    }

    /// Overlap of two rects; `None` unless it has positive area.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let (a, b) = (self.normalized(), other.normalized());
        let lo = Vec2::new(a.min().x.max(b.min().x), a.min().y.max(b.min().y));
        let hi = Vec2::new(a.max().x.min(b.max().x), a.max().y.min(b.max().y));
        (hi.x > lo.x && hi.y > lo.y).then(|| Self::from_corners(lo, hi))
    }
}
