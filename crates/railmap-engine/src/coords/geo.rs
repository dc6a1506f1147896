use std::fmt;

/// Geographic map coordinate as produced by a map projection.
///
/// `alt` carries the world elevation through the projection; it never takes part
/// in 2D geometry.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
    pub alt: Option<f64>,
}

impl LatLng {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, alt: None }
    }

    #[inline]
    pub const fn with_alt(lat: f64, lng: f64, alt: f64) -> Self {
        Self { lat, lng, alt: Some(alt) }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Linear interpolation of lat/lng; altitude is taken from `to`.
    #[inline]
    pub fn lerp(self, to: LatLng, t: f64) -> LatLng {
        LatLng {
            lat: self.lat + (to.lat - self.lat) * t,
            lng: self.lng + (to.lng - self.lng) * t,
            alt: to.alt,
        }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Axis-aligned box in overlay path space.
///
/// Path data is written as `lat,lng` pairs, so `x` is latitude and `y` is longitude.
/// Same shape as `Rect`, but in map units and double precision.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GeoRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl GeoRect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<GeoRect>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        let (mut x0, mut y0, mut x1, mut y1) = (first.lat, first.lng, first.lat, first.lng);
        for p in iter {
            x0 = x0.min(p.lat);
            y0 = y0.min(p.lng);
            x1 = x1.max(p.lat);
            y1 = y1.max(p.lng);
        }

        Some(GeoRect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Smallest box containing both boxes.
    #[inline]
    pub fn union(self, other: GeoRect) -> GeoRect {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = (self.x + self.width).max(other.x + other.width);
        let y1 = (self.y + self.height).max(other.y + other.height);
        GeoRect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Folds an optional accumulator with another box.
    #[inline]
    pub fn union_opt(acc: Option<GeoRect>, other: GeoRect) -> Option<GeoRect> {
        Some(match acc {
            Some(a) => a.union(other),
            None => other,
        })
    }

    #[inline]
    pub fn center(self) -> LatLng {
        LatLng::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn min(self) -> LatLng {
        LatLng::new(self.x, self.y)
    }

    #[inline]
    pub fn max(self) -> LatLng {
        LatLng::new(self.x + self.width, self.y + self.height)
    }
}

/// Corner pair used to place an overlay on the map.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GeoBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl GeoBounds {
    #[inline]
    pub const fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self { south_west, north_east }
    }

    /// Zero-area bounds at the map origin, used before anything has been drawn.
    #[inline]
    pub const fn placeholder() -> Self {
        Self::new(LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.0))
    }

    /// Bounds spanning `rect`, both corners at altitude `alt`.
    #[inline]
    pub fn from_rect(rect: GeoRect, alt: Option<f64>) -> Self {
        Self {
            south_west: LatLng { lat: rect.x, lng: rect.y, alt },
            north_east: LatLng { lat: rect.x + rect.width, lng: rect.y + rect.height, alt },
        }
    }

    #[inline]
    pub fn to_rect(self) -> GeoRect {
        GeoRect::new(
            self.south_west.lat,
            self.south_west.lng,
            self.north_east.lat - self.south_west.lat,
            self.north_east.lng - self.south_west.lng,
        )
    }
}
