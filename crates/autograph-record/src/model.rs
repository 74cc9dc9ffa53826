use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// A sampled pointer location.
///
/// `x` / `y` are logical pixels relative to the capture surface's top-left
/// corner. `timestamp` is monotonic milliseconds; only differences between
/// points of the same capture session are meaningful.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub timestamp: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32, timestamp: f64) -> Self {
        Self { x, y, timestamp }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.timestamp.is_finite()
    }
}

/// One continuous pointer-down-to-pointer-up gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Unique within the owning record.
    pub id: String,
    /// CSS color spec (`#rrggbb`, `rgb(...)`, named colors, ...).
    pub color: String,
    /// Line width in logical pixels.
    pub width: f32,
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(id: impl Into<String>, color: impl Into<String>, width: f32) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            width,
            points: Vec::new(),
        }
    }

    /// Builder-style helper, mostly for tests and fixtures.
    pub fn with_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.points.extend(points);
        self
    }

    /// A stroke is drawable once it has a segment, i.e. two or more points.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Timestamps of the first and last point.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((first.timestamp, last.timestamp))
    }
}

/// A complete signature: strokes in draw order.
///
/// Serializes as a bare JSON array of strokes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeRecord {
    strokes: Vec<Stroke>,
}

impl StrokeRecord {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    /// Appends a finished stroke.
    #[inline]
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    #[inline]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn into_strokes(self) -> Vec<Stroke> {
        self.strokes
    }

    /// Total number of points across all strokes.
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|s| s.points.len()).sum()
    }

    /// Earliest and latest timestamp over every point, independent of stroke order.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        self.strokes
            .iter()
            .flat_map(|s| s.points.iter())
            .fold(None, |acc, p| match acc {
                None => Some((p.timestamp, p.timestamp)),
                Some((lo, hi)) => Some((lo.min(p.timestamp), hi.max(p.timestamp))),
            })
    }

    /// Checks the invariants a captured record always satisfies.
    ///
    /// Decoding does not call this; records from storage are accepted as-is
    /// and renderers skip what they cannot draw.
    pub fn validate(&self) -> Result<(), RecordError> {
        let mut ids = HashSet::with_capacity(self.strokes.len());

        for (i, stroke) in self.strokes.iter().enumerate() {
            if !ids.insert(stroke.id.as_str()) {
                return Err(RecordError::invalid(i, format!("duplicate id {:?}", stroke.id)));
            }
            if !(stroke.width.is_finite() && stroke.width > 0.0) {
                return Err(RecordError::invalid(i, format!("width {} is not positive", stroke.width)));
            }
            if !stroke.is_drawable() {
                return Err(RecordError::invalid(i, "fewer than 2 points"));
            }
            if let Some(j) = stroke.points.iter().position(|p| !p.is_finite()) {
                return Err(RecordError::invalid(i, format!("point {j} is not finite")));
            }
            if stroke
                .points
                .windows(2)
                .any(|w| w[1].timestamp < w[0].timestamp)
            {
                return Err(RecordError::invalid(i, "timestamps go backwards"));
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a StrokeRecord {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}

impl FromIterator<Stroke> for StrokeRecord {
    fn from_iter<T: IntoIterator<Item = Stroke>>(iter: T) -> Self {
        Self { strokes: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(id: &str, ts: &[f64]) -> Stroke {
        Stroke::new(id, "#000", 2.0)
            .with_points(ts.iter().enumerate().map(|(i, &t)| Point::new(i as f32, i as f32, t)))
    }

    // ── time_span ─────────────────────────────────────────────────────────

    #[test]
    fn time_span_of_empty_record_is_none() {
        assert_eq!(StrokeRecord::new().time_span(), None);
    }

    #[test]
    fn time_span_ignores_stroke_order() {
        let rec = StrokeRecord::from_strokes(vec![
            stroke("late", &[500.0, 600.0]),
            stroke("early", &[10.0, 20.0]),
        ]);
        assert_eq!(rec.time_span(), Some((10.0, 600.0)));
        assert_eq!(rec.point_count(), 4);
    }

    // ── validate ──────────────────────────────────────────────────────────

    #[test]
    fn validate_accepts_captured_shape() {
        let rec = StrokeRecord::from_strokes(vec![stroke("a", &[0.0, 5.0, 5.0]), stroke("b", &[9.0, 12.0])]);
        assert!(rec.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let rec = StrokeRecord::from_strokes(vec![stroke("a", &[0.0, 1.0]), stroke("a", &[2.0, 3.0])]);
        assert!(matches!(rec.validate(), Err(RecordError::Invalid { stroke: 1, .. })));
    }

    #[test]
    fn validate_rejects_single_point_stroke() {
        let rec = StrokeRecord::from_strokes(vec![stroke("tap", &[0.0])]);
        assert!(matches!(rec.validate(), Err(RecordError::Invalid { stroke: 0, .. })));
    }

    #[test]
    fn validate_rejects_non_positive_width() {
        let mut s = stroke("a", &[0.0, 1.0]);
        s.width = 0.0;
        assert!(StrokeRecord::from_strokes(vec![s]).validate().is_err());
    }

    #[test]
    fn validate_rejects_backwards_time() {
        let rec = StrokeRecord::from_strokes(vec![stroke("a", &[10.0, 4.0])]);
        assert!(rec.validate().is_err());
    }

    #[test]
    fn validate_rejects_nan_coordinates() {
        let mut s = stroke("a", &[0.0, 1.0]);
        s.points[1].x = f32::NAN;
        assert!(StrokeRecord::from_strokes(vec![s]).validate().is_err());
    }
}
