use crate::coords::Vec2;

use super::ink::{InkStyle, SegmentCmd};

/// Segments in paint order plus a counter bumped by every change.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    items: Vec<SegmentCmd>,
    revision: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_segment(&mut self, from: Vec2, to: Vec2, style: InkStyle) {
        self.items.push(SegmentCmd { from, to, style });
        self.touch();
    }

    /// Consecutive segments through `points`. A single point adds nothing.
    pub fn push_polyline(&mut self, points: &[Vec2], style: InkStyle) {
        if points.len() < 2 {
            return;
        }
        self.items.extend(points.windows(2).map(|w| SegmentCmd { from: w[0], to: w[1], style }));
        self.touch();
    }

    /// Drops every segment, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    #[inline]
    pub fn items(&self) -> &[SegmentCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
