use std::fmt;

/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
///
/// Rationale:
/// - Correct blending with linear filtering (avoids fringes).
/// - Matches typical GPU blending configurations for UI compositing.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Parses a CSS color string (`"#e0a030"`, `"rgb(10, 20, 30)"`, `"steelblue"`, ...).
    pub fn parse(css: &str) -> Result<Self, ColorParseError> {
        let c = csscolorparser::parse(css.trim()).map_err(|e| ColorParseError {
            input: css.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_srgb(c.r as f32, c.g as f32, c.b as f32, c.a as f32))
    }

    /// Scales the color by `opacity` in [0, 1], as a CSS `opacity` would.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let o = opacity.clamp(0.0, 1.0);
        Self { r: self.r * o, g: self.g * o, b: self.b * o, a: self.a * o }
    }

    /// Creates a premultiplied color from straight sRGB `f32` components in `[0, 1]`.
    #[inline]
    pub fn from_srgb(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::from_straight(r, g, b, a)
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

/// A color string that could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorParseError {
    pub input: String,
    pub reason: String,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse ─────────────────────────────────────────────────────────────

    #[test]
    fn parse_hex_is_premultiplied() {
        let c = Color::parse("#ff000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.r - c.a).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
    }

    #[test]
    fn parse_named_color() {
        let c = Color::parse(" white ").unwrap();
        assert_eq!(c, Color::from_premul(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = Color::parse("not-a-color").unwrap_err();
        assert_eq!(err.input, "not-a-color");
    }

    // ── with_opacity ──────────────────────────────────────────────────────

    #[test]
    fn zero_opacity_is_transparent() {
        let c = Color::from_straight(0.2, 0.4, 0.6, 1.0).with_opacity(0.0);
        assert_eq!(c, Color::transparent());
    }
}
