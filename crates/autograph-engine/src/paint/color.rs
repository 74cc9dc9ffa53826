/// Premultiplied RGBA in the sRGB encoding CSS uses.
///
/// The swapchain is not an sRGB format, so these values reach the display
/// unchanged.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Parses a CSS color spec: hex (`#rgb`, `#rrggbb`, `#rrggbbaa`),
    /// functional (`rgb()`, `rgba()`, `hsl()`), or a named color.
    ///
    /// Returns `None` for anything the parser does not understand.
    pub fn from_css(spec: &str) -> Option<Self> {
        let c = csscolorparser::parse(spec.trim()).ok()?;
        Some(Self::from_straight(c.r as f32, c.g as f32, c.b as f32, c.a as f32))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool { (a - b).abs() < 1e-3 }

    #[test]
    fn parses_hex() {
        let c = Color::from_css("#ff0000").unwrap();
        assert_eq!(c, Color::from_straight(1.0, 0.0, 0.0, 1.0));
        assert_eq!(Color::from_css("#000"), Some(Color::black()));
    }

    #[test]
    fn parses_named_and_functional() {
        assert_eq!(Color::from_css("white"), Some(Color::white()));
        let c = Color::from_css("rgba(0, 0, 255, 0.5)").unwrap();
        assert!(close(c.b, 0.5) && close(c.a, 0.5), "{c:?}");
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(Color::from_css("  black "), Some(Color::black()));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::from_css("not-a-color"), None);
        assert_eq!(Color::from_css(""), None);
    }

    #[test]
    fn straight_alpha_is_premultiplied() {
        let c = Color::from_straight(0.2, 0.4, 0.6, 0.5);
        assert!(close(c.r, 0.1) && close(c.g, 0.2) && close(c.b, 0.3) && close(c.a, 0.5));
        assert_eq!(Color::from_srgb_u8(255, 255, 255, 255), Color::white());
    }
}
