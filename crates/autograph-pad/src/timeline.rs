//! Time-ordered view of a record for animated playback.

use autograph_engine::coords::Vec2;
use autograph_record::StrokeRecord;

/// One point of the flattened record.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimelineEntry {
    pub position: Vec2,
    pub timestamp: f64,
    /// Index of the owning stroke in the record.
    pub stroke: usize,
    /// Index of the point within its stroke.
    pub index: usize,
}

/// Every point of a record sorted by capture time, plus the speed factor
/// that squeezes the signature into the configured maximum duration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayTimeline {
    entries: Vec<TimelineEntry>,
    speed: f64,
}

impl ReplayTimeline {
    /// Flattens and sorts `record`.
    ///
    /// Returns `None` when fewer than two points with finite data exist;
    /// there is nothing to animate and the caller renders statically.
    ///
    /// Equal timestamps are ordered by stroke index, then point index, so
    /// the order never depends on the sort algorithm.
    pub fn build(record: &StrokeRecord, max_duration_ms: f64) -> Option<Self> {
        let mut entries: Vec<TimelineEntry> = record
            .iter()
            .enumerate()
            .flat_map(|(stroke, s)| {
                s.points.iter().enumerate().filter(|(_, p)| p.is_finite()).map(move |(index, p)| {
                    TimelineEntry { position: Vec2::new(p.x, p.y), timestamp: p.timestamp, stroke, index }
                })
            })
            .collect();

        if entries.len() < 2 {
            return None;
        }

        entries.sort_by(|a, b| {
            a.timestamp
                .total_cmp(&b.timestamp)
                .then(a.stroke.cmp(&b.stroke))
                .then(a.index.cmp(&b.index))
        });

        let total = entries[entries.len() - 1].timestamp - entries[0].timestamp;
        let animation = if max_duration_ms.is_finite() && max_duration_ms > 0.0 {
            total.min(max_duration_ms)
        } else {
            total
        };
        let speed = if animation > 0.0 { total / animation } else { 1.0 };

        Some(Self { entries, speed })
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Earliest timestamp.
    pub fn first(&self) -> f64 {
        self.entries[0].timestamp
    }

    /// Latest timestamp.
    pub fn last(&self) -> f64 {
        self.entries[self.entries.len() - 1].timestamp
    }

    /// Signature time covered, in ms.
    pub fn total(&self) -> f64 {
        self.last() - self.first()
    }

    /// Signature milliseconds per playback millisecond (>= 1).
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Playback length in ms.
    pub fn duration(&self) -> f64 {
        self.total() / self.speed
    }

    /// Signature time reached after `elapsed_ms` of playback.
    pub fn signature_time(&self, elapsed_ms: f64) -> f64 {
        self.first() + elapsed_ms * self.speed
    }
}
