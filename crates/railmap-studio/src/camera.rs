use railmap_engine::coords::{GeoRect, LatLng, Rect, Vec2, Viewport};

/// Pixels per map unit limits.
const MIN_ZOOM: f64 = 1e-3;
const MAX_ZOOM: f64 = 1e4;

/// Share of the viewport left empty around fitted content.
const FIT_MARGIN: f64 = 0.1;

/// Smallest extent `fit` will zoom into, in map units.
const MIN_FIT_EXTENT: f64 = 1.0;

/// Maps map space onto logical pixels, north up.
///
/// `lng` grows to the right and `lat` grows upwards, so screen `y` follows `-lat`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MapCamera {
    center: LatLng,
    zoom: f64,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self { center: LatLng::default(), zoom: 8.0 }
    }
}

impl MapCamera {
    #[inline]
    pub fn center(&self) -> LatLng {
        self.center
    }

    /// Pixels per map unit.
    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn to_screen(&self, ll: LatLng, vp: Viewport) -> Vec2 {
        let c = vp.center();
        Vec2::new(
            ((ll.lng - self.center.lng) * self.zoom) as f32 + c.x,
            (-(ll.lat - self.center.lat) * self.zoom) as f32 + c.y,
        )
    }

    pub fn to_map(&self, p: Vec2, vp: Viewport) -> LatLng {
        let c = vp.center();
        LatLng::new(
            self.center.lat - (p.y - c.y) as f64 / self.zoom,
            self.center.lng + (p.x - c.x) as f64 / self.zoom,
        )
    }

    pub fn to_screen_rect(&self, r: GeoRect, vp: Viewport) -> Rect {
        Rect::from_corners(self.to_screen(r.min(), vp), self.to_screen(r.max(), vp))
    }

    /// Centers on `r` and zooms so it fills the viewport, minus a margin.
    pub fn fit(&mut self, r: GeoRect, vp: Viewport) {
        if !vp.is_valid() {
            return;
        }
        self.center = r.center();

        // Latitude runs vertically, longitude horizontally.
        let zx = vp.width as f64 / r.height.max(MIN_FIT_EXTENT);
        let zy = vp.height as f64 / r.width.max(MIN_FIT_EXTENT);
        self.zoom = (zx.min(zy) * (1.0 - FIT_MARGIN)).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Moves the content by `delta` logical pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.center.lng -= delta.x as f64 / self.zoom;
        self.center.lat += delta.y as f64 / self.zoom;
    }

    /// Multiplies the zoom by `factor`, keeping the map point under `anchor` in place.
    pub fn zoom_at(&mut self, factor: f64, anchor: Vec2, vp: Viewport) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let before = self.to_map(anchor, vp);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let after = self.to_map(anchor, vp);

        self.center.lat += before.lat - after.lat;
        self.center.lng += before.lng - after.lng;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn near(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn center_maps_to_viewport_center() {
        let cam = MapCamera::default();
        assert_eq!(cam.to_screen(cam.center(), VP), VP.center());
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let cam = MapCamera::default();
        let north = cam.to_screen(LatLng::new(1.0, 0.0), VP);
        let east = cam.to_screen(LatLng::new(0.0, 1.0), VP);
        assert!(north.y < VP.center().y);
        assert!(east.x > VP.center().x);
    }

    #[test]
    fn screen_and_map_round_trip() {
        let mut cam = MapCamera::default();
        cam.pan(Vec2::new(13.0, -7.0));
        let p = Vec2::new(100.0, 250.0);
        assert!(near(cam.to_screen(cam.to_map(p, VP), VP), p));
    }

    // ── fit ───────────────────────────────────────────────────────────────

    #[test]
    fn fit_contains_the_rect_with_margin() {
        let mut cam = MapCamera::default();
        let r = GeoRect::new(-10.0, 40.0, 20.0, 100.0);
        cam.fit(r, VP);

        let s = cam.to_screen_rect(r, VP);
        assert!(s.origin.x >= 0.0 && s.origin.y >= 0.0);
        assert!(s.max().x <= VP.width && s.max().y <= VP.height);
        assert!(near(s.center(), VP.center()));
    }

    #[test]
    fn fit_of_a_point_does_not_blow_up() {
        let mut cam = MapCamera::default();
        cam.fit(GeoRect::new(5.0, 5.0, 0.0, 0.0), VP);
        assert!(cam.zoom().is_finite() && cam.zoom() <= MAX_ZOOM);
    }

    // ── pan / zoom ────────────────────────────────────────────────────────

    #[test]
    fn pan_drags_content_with_pointer() {
        let mut cam = MapCamera::default();
        let ll = LatLng::new(3.0, 4.0);
        let before = cam.to_screen(ll, VP);
        cam.pan(Vec2::new(25.0, 10.0));
        assert!(near(cam.to_screen(ll, VP), before + Vec2::new(25.0, 10.0)));
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut cam = MapCamera::default();
        let anchor = Vec2::new(120.0, 80.0);
        let under = cam.to_map(anchor, VP);
        cam.zoom_at(2.5, anchor, VP);
        assert!(near(cam.to_screen(under, VP), anchor));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = MapCamera::default();
        cam.zoom_at(1e12, VP.center(), VP);
        assert_eq!(cam.zoom(), MAX_ZOOM);
    }
}
