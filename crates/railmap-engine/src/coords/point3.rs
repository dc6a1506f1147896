use core::ops::{Add, Mul, Neg, Sub};

/// Position or offset in world space (blocks).
///
/// Axis convention follows the simulation feeding the map:
/// - `x` and `z` span the horizontal plane
/// - `y` is elevation
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Sign mask that mirrors a horizontal offset to the other side of a centreline.
    ///
    /// Use with [`Point3::mul_mask`]. Elevation is left untouched.
    pub const NEG_POS: Point3 = Point3::new(-1.0, 1.0, -1.0);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Component-wise sum.
    #[inline]
    pub fn add(self, other: Point3) -> Point3 {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Multiplies every component by `k`.
    #[inline]
    pub fn scale(self, k: f64) -> Point3 {
        Point3::new(self.x * k, self.y * k, self.z * k)
    }

    /// Per-axis multiply, typically with a sign mask such as [`Point3::NEG_POS`].
    #[inline]
    pub fn mul_mask(self, mask: Point3) -> Point3 {
        Point3::new(self.x * mask.x, self.y * mask.y, self.z * mask.z)
    }

    /// Length of the full 3D vector.
    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Length of the projection onto the horizontal (x, z) plane.
    #[inline]
    pub fn horizontal_length(self) -> f64 {
        self.x.hypot(self.z)
    }

    #[inline]
    pub fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Point3 {
    type Output = Point3;
    #[inline]
    fn add(self, rhs: Point3) -> Point3 {
        Point3::add(self, rhs)
    }
}

impl Sub for Point3 {
    type Output = Point3;
    #[inline]
    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;
    #[inline]
    fn mul(self, rhs: f64) -> Point3 {
        self.scale(rhs)
    }
}

impl Neg for Point3 {
    type Output = Point3;
    #[inline]
    fn neg(self) -> Point3 {
        Point3::new(-self.x, -self.y, -self.z)
    }
}

/// Horizontal heading from `from` toward `to`, scaled to `magnitude`.
///
/// Elevation changes do not contribute to the heading, so the result always has `y == 0`.
/// Returns the zero vector when the two points share the same horizontal position
/// (identical points or a purely vertical segment).
pub fn directional_vector(from: Point3, to: Point3, magnitude: f64) -> Point3 {
    let d = to - from;
    let len = d.horizontal_length();

    if len == 0.0 || !len.is_finite() {
        return Point3::zero();
    }

    let k = magnitude / len;
    Point3::new(d.x * k, 0.0, d.z * k)
}

/// Rotates `v` by 90 degrees within the horizontal plane.
///
/// `(x, y, z) -> (-z, 0, x)`. The result keeps the horizontal magnitude of `v`;
/// applying it twice yields the horizontal part of `v`, negated.
#[inline]
pub fn perpendicular_vector(v: Point3) -> Point3 {
    Point3::new(-v.z, 0.0, v.x)
}
