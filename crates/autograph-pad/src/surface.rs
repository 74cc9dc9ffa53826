//! The drawing seam between the engines and whatever displays ink.

use autograph_engine::coords::{SurfaceSize, Vec2};
use autograph_engine::paint::Color;
use autograph_engine::scene::{DrawList, InkStyle};
use autograph_record::Stroke;

/// A 2D raster target that ink is drawn onto.
///
/// All coordinates are logical pixels relative to the surface's top-left
/// corner. Implementations map them onto a backing buffer of
/// `logical * scale_factor` physical pixels.
pub trait InkSurface {
    /// Resizes the backing buffer. Previously drawn ink is lost.
    fn configure(&mut self, size: SurfaceSize);

    fn size(&self) -> SurfaceSize;

    /// Erases all ink.
    fn clear(&mut self);

    fn draw_segment(&mut self, from: Vec2, to: Vec2, style: &InkStyle);

    /// Draws consecutive points as connected segments.
    fn draw_polyline(&mut self, points: &[Vec2], style: &InkStyle) {
        for pair in points.windows(2) {
            self.draw_segment(pair[0], pair[1], style);
        }
    }
}

/// Retained ink surface backed by an engine [`DrawList`].
///
/// The desktop host renders its list with the GPU segment renderer; tests
/// read it back to check exactly what was drawn.
#[derive(Debug, Default, Clone)]
pub struct InkCanvas {
    list: DrawList,
    size: SurfaceSize,
}

impl InkCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded ink in paint order.
    pub fn list(&self) -> &DrawList {
        &self.list
    }

    /// Physical backing-buffer size.
    pub fn backing(&self) -> (u32, u32) {
        self.size.backing()
    }

    /// Recorded segments as `((x0, y0), (x1, y1))` pairs.
    pub fn segment_coords(&self) -> Vec<((f32, f32), (f32, f32))> {
        self.list
            .items()
            .iter()
            .map(|s| ((s.from.x, s.from.y), (s.to.x, s.to.y)))
            .collect()
    }
}

impl InkSurface for InkCanvas {
    fn configure(&mut self, size: SurfaceSize) {
        self.size = size;
        self.list.clear();
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.list.clear();
    }

    fn draw_segment(&mut self, from: Vec2, to: Vec2, style: &InkStyle) {
        self.list.push_segment(from, to, *style);
    }
}

/// Turns a stroke's stored color and width into an [`InkStyle`].
///
/// Unparseable colors fall back to black; the first fallback is logged.
#[derive(Debug, Default)]
pub(crate) struct StyleResolver {
    warned: bool,
}

impl StyleResolver {
    pub(crate) fn resolve(&mut self, color: &str, width: f32) -> InkStyle {
        let color = Color::from_css(color).unwrap_or_else(|| {
            if !self.warned {
                log::warn!("unparseable ink color {color:?}; drawing in black");
                self.warned = true;
            }
            Color::black()
        });
        InkStyle::new(color, width)
    }

    pub(crate) fn for_stroke(&mut self, stroke: &Stroke) -> InkStyle {
        self.resolve(&stroke.color, stroke.width)
    }
}

/// Finite point locations of a stroke, in order.
pub(crate) fn stroke_path(stroke: &Stroke) -> Vec<Vec2> {
    stroke
        .points
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| Vec2::new(p.x, p.y))
        .collect()
}
