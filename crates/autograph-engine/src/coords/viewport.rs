/// Viewport size in logical pixels.
///
/// Renderers treat this as the coordinate basis for converting logical px
/// positions to NDC in shaders.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Logical size of a drawing surface plus its device pixel ratio.
///
/// The backing buffer is `logical * scale_factor` physical pixels; drawing
/// calls stay in logical pixels and are scaled uniformly by `scale_factor`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceSize {
    pub logical: Viewport,
    pub scale_factor: f32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: f32, height: f32, scale_factor: f32) -> Self {
        Self { logical: Viewport::new(width, height), scale_factor }
    }

    /// Non-zero area, finite, with a positive scale factor.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.logical.is_valid() && self.scale_factor.is_finite() && self.scale_factor > 0.0
    }

    /// Physical backing-buffer size, rounded to whole pixels.
    #[inline]
    pub fn backing(self) -> (u32, u32) {
        (
            (self.logical.width * self.scale_factor).round().max(0.0) as u32,
            (self.logical.height * self.scale_factor).round().max(0.0) as u32,
        )
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}
