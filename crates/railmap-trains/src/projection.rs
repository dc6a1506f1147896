use railmap_engine::coords::{LatLng, Point3};

use crate::config::ProjectionConfig;

/// The map the overlays are placed on.
pub trait MapHost {
    /// Name of the world currently shown.
    fn world_name(&self) -> &str;

    /// Projects a world position onto the map.
    fn to_lat_lng(&self, point: Point3) -> LatLng;
}

/// Dynmap's tile projection: a 3x3 world-to-map matrix followed by tile scaling.
///
/// `alt` carries the world elevation through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynmapProjection {
    world_to_map: [f64; 9],
    tile_scale: u32,
    map_zoom_out: u32,
}

impl DynmapProjection {
    pub fn new(world_to_map: [f64; 9], tile_scale: u32, map_zoom_out: u32) -> Self {
        Self { world_to_map, tile_scale, map_zoom_out }
    }

    pub fn to_lat_lng(&self, p: Point3) -> LatLng {
        let m = &self.world_to_map;
        let xx = m[0] * p.x + m[1] * p.y + m[2] * p.z;
        let yy = m[3] * p.x + m[4] * p.y + m[5] * p.z;

        let tile = 128.0 * exp2(self.tile_scale);
        let zoom = exp2(self.map_zoom_out);

        LatLng::with_alt(-(tile - yy) / zoom, xx / zoom, p.y)
    }
}

/// `2^n`, saturating to infinity instead of wrapping for huge `n`.
fn exp2(n: u32) -> f64 {
    2f64.powi(i32::try_from(n).unwrap_or(i32::MAX))
}

impl From<&ProjectionConfig> for DynmapProjection {
    fn from(cfg: &ProjectionConfig) -> Self {
        Self::new(cfg.world_to_map, cfg.tile_scale, cfg.map_zoom_out)
    }
}

/// A fixed map showing one world through one projection.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMap {
    pub world: String,
    pub projection: DynmapProjection,
}

impl StaticMap {
    pub fn new(world: impl Into<String>, projection: DynmapProjection) -> Self {
        Self { world: world.into(), projection }
    }
}

impl MapHost for StaticMap {
    fn world_name(&self) -> &str {
        &self.world
    }

    fn to_lat_lng(&self, point: Point3) -> LatLng {
        self.projection.to_lat_lng(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn flat() -> DynmapProjection {
        DynmapProjection::from(&ProjectionConfig::default())
    }

    #[test]
    fn origin_maps_to_tile_corner() {
        let ll = flat().to_lat_lng(Point3::zero());
        assert!((ll.lat + 2.0).abs() < EPS);
        assert!(ll.lng.abs() < EPS);
    }

    #[test]
    fn flat_map_is_top_down() {
        // x goes east (lng), z goes south (lat decreases).
        let p = flat();
        let a = p.to_lat_lng(Point3::new(0.0, 64.0, 0.0));
        let b = p.to_lat_lng(Point3::new(16.0, 64.0, 16.0));
        assert!((b.lng - a.lng - 1.0).abs() < EPS);
        assert!((b.lat - a.lat + 1.0).abs() < EPS);
    }

    #[test]
    fn elevation_becomes_altitude_only() {
        let p = flat();
        let low = p.to_lat_lng(Point3::new(5.0, 10.0, 5.0));
        let high = p.to_lat_lng(Point3::new(5.0, 200.0, 5.0));
        assert_eq!((low.lat, low.lng), (high.lat, high.lng));
        assert_eq!(high.alt, Some(200.0));
    }

    #[test]
    fn tile_scale_shifts_latitude_origin() {
        let p = DynmapProjection::new(ProjectionConfig::default().world_to_map, 1, 0);
        assert!((p.to_lat_lng(Point3::zero()).lat + 256.0).abs() < EPS);
    }

    #[test]
    fn huge_shift_saturates_instead_of_wrapping() {
        let p = DynmapProjection::new(ProjectionConfig::default().world_to_map, u32::MAX, 0);
        assert_eq!(p.to_lat_lng(Point3::zero()).lat, f64::NEG_INFINITY);
    }

    #[test]
    fn static_map_reports_its_world() {
        let map = StaticMap::new("world_nether", flat());
        assert_eq!(map.world_name(), "world_nether");
        assert_eq!(map.to_lat_lng(Point3::zero()), flat().to_lat_lng(Point3::zero()));
    }
}
