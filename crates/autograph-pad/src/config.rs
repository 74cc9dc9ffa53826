//! Pad settings. Plain structs with defaults and builder-style setters.

use autograph_engine::paint::Color;

/// Pen used for strokes created from now on.
#[derive(Debug, Clone, PartialEq)]
pub struct InkConfig {
    /// CSS color spec stored verbatim on each stroke.
    pub color: String,
    /// Line width in logical pixels.
    pub width: f32,
}

impl Default for InkConfig {
    fn default() -> Self {
        Self { color: "#1a1a2e".to_string(), width: 2.5 }
    }
}

impl InkConfig {
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

/// Animated replay settings.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReplayConfig {
    /// Upper bound on animation length. Longer signatures are sped up to fit.
    pub max_duration_ms: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self { max_duration_ms: 3000.0 }
    }
}

impl ReplayConfig {
    pub fn max_duration_ms(mut self, ms: f64) -> Self {
        self.max_duration_ms = ms;
        self
    }
}

/// Desktop host settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PadConfig {
    pub ink: InkConfig,
    pub replay: ReplayConfig,
    /// Gap between the window edge and the signing area, in logical pixels.
    pub margin: f32,
    pub background: Color,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            ink: InkConfig::default(),
            replay: ReplayConfig::default(),
            margin: 24.0,
            background: Color::from_srgb_u8(0xfa, 0xfa, 0xf7, 0xff),
        }
    }
}

impl PadConfig {
    pub fn ink(mut self, ink: InkConfig) -> Self {
        self.ink = ink;
        self
    }

    pub fn replay(mut self, replay: ReplayConfig) -> Self {
        self.replay = replay;
        self
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}
