use crate::coords::Vec2;
use crate::paint::Color;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
}

/// Resolved pen.
///
/// Segments are drawn one by one, so round caps double as round joins
/// along a polyline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InkStyle {
    pub color: Color,
    /// Logical pixels.
    pub width: f32,
    pub cap: LineCap,
}

impl InkStyle {
    #[inline]
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width, cap: LineCap::Round }
    }

    #[inline]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
}

/// A straight piece of ink, endpoints in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub style: InkStyle,
}
