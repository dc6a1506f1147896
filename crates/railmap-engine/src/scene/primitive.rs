use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::coords::{GeoRect, LatLng};
use crate::paint::Paint;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a drawable primitive.
///
/// Ids are unique for the lifetime of the process, so hosts can key per-primitive
/// state (animation tracks) across all surfaces.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(u64);

impl PrimitiveId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Closed polygon outline in map space.
///
/// An empty path is valid and draws nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    points: Vec<LatLng>,
}

impl Path {
    #[inline]
    pub fn new(points: Vec<LatLng>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bbox(&self) -> Option<GeoRect> {
        GeoRect::from_points(self.points.iter().copied())
    }

    /// SVG path data: `M lat,lng L lat,lng ...`.
    ///
    /// Deterministic for a given point list, so equal paths always serialize byte-identically.
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            let cmd = if i == 0 { 'M' } else { 'L' };
            // Writing into a String cannot fail.
            let _ = write!(d, "{cmd} {p}");
        }
        d
    }

    /// Point-wise interpolation toward `to`. Both paths must have the same length.
    pub fn lerp(&self, to: &Path, t: f64) -> Path {
        debug_assert_eq!(self.len(), to.len(), "Path::lerp requires equal vertex counts");
        Path::new(
            self.points
                .iter()
                .zip(to.points.iter())
                .map(|(a, b)| a.lerp(*b, t))
                .collect(),
        )
    }
}

/// Linear style transition applied by the host when a primitive's path changes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transition {
    pub duration: Duration,
}

impl Transition {
    #[inline]
    pub const fn linear(duration: Duration) -> Self {
        Self { duration }
    }

    /// Progress in [0, 1] after `elapsed`. Zero-length transitions are always complete.
    #[inline]
    pub fn progress(self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Presentation attributes of a primitive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    pub fill: Paint,
    pub opacity: f32,
    pub transition: Option<Transition>,
}

impl Style {
    /// Style of calculation-only primitives: present for bounds, never visible.
    #[inline]
    pub const fn hidden() -> Self {
        Self { fill: Paint::None, opacity: 0.0, transition: None }
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.opacity <= 0.0 || self.fill == Paint::None
    }
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: Paint::None, opacity: 1.0, transition: None }
    }
}

/// A single drawable shape owned by a [`Surface`](super::Surface).
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    id: PrimitiveId,
    path: Path,
    style: Style,
}

impl Primitive {
    pub(crate) fn new(style: Style) -> Self {
        Self { id: PrimitiveId::next(), path: Path::empty(), style }
    }

    #[inline]
    pub fn id(&self) -> PrimitiveId {
        self.id
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    #[inline]
    pub fn set_path(&mut self, path: Path) {
        self.path = path;
    }

    #[inline]
    pub fn clear_path(&mut self) {
        self.path = Path::empty();
    }

    #[inline]
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ll(lat: f64, lng: f64) -> LatLng {
        LatLng::new(lat, lng)
    }

    // ── Path ──────────────────────────────────────────────────────────────

    #[test]
    fn svg_d_uses_move_then_line() {
        let path = Path::new(vec![ll(1.0, 2.0), ll(-3.5, 4.0), ll(0.0, 0.25)]);
        assert_eq!(path.to_svg_d(), "M 1,2 L -3.5,4 L 0,0.25");
    }

    #[test]
    fn svg_d_empty_path() {
        assert_eq!(Path::empty().to_svg_d(), "");
    }

    #[test]
    fn lerp_halfway() {
        let a = Path::new(vec![ll(0.0, 0.0), ll(2.0, 2.0)]);
        let b = Path::new(vec![ll(2.0, 4.0), ll(4.0, 2.0)]);
        assert_eq!(a.lerp(&b, 0.5), Path::new(vec![ll(1.0, 2.0), ll(3.0, 2.0)]));
    }

    // ── Transition ────────────────────────────────────────────────────────

    #[test]
    fn transition_progress_clamps() {
        let t = Transition::linear(Duration::from_millis(500));
        assert_eq!(t.progress(Duration::ZERO), 0.0);
        assert!((t.progress(Duration::from_millis(250)) - 0.5).abs() < 1e-9);
        assert_eq!(t.progress(Duration::from_secs(3)), 1.0);
    }

    #[test]
    fn zero_transition_is_instant() {
        assert_eq!(Transition::linear(Duration::ZERO).progress(Duration::ZERO), 1.0);
    }

    // ── Primitive ─────────────────────────────────────────────────────────

    #[test]
    fn primitives_get_distinct_ids() {
        let a = Primitive::new(Style::default());
        let b = Primitive::new(Style::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn hidden_style_is_hidden() {
        assert!(Style::hidden().is_hidden());
        assert_eq!(Style::hidden().opacity, 0.0);
    }
}
