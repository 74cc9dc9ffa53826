//! Live signature capture.
//!
//! ```text
//!   Idle ──down──▶ Drawing ──move──▶ Drawing
//!    ▲                │
//!    └──up/leave/cancel┘  (finalize: keep if >= 2 points, else discard)
//! ```

use autograph_engine::coords::{Rect, SurfaceSize, Vec2};
use autograph_record::{Point, Stroke, StrokeRecord};

use crate::config::InkConfig;
use crate::pointer::{PointerPhase, PointerSource};
use crate::surface::{stroke_path, InkSurface, StyleResolver};

/// Where the capture state machine is.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    Idle,
    Drawing {
        /// The stroke being built. Not yet part of the record.
        stroke: Stroke,
        /// Surface-local position of the newest point.
        last: Vec2,
        /// Touch contact owning the gesture; `None` for the mouse.
        contact: Option<u64>,
    },
}

/// Turns pointer input into a [`StrokeRecord`] while inking it on `surface`.
pub struct CaptureEngine<S: InkSurface> {
    surface: S,
    bounds: Rect,
    config: InkConfig,
    state: CaptureState,
    record: StrokeRecord,
    next_id: u64,
    styles: StyleResolver,
}

impl<S: InkSurface> CaptureEngine<S> {
    /// Binds to `surface`, which occupies `bounds` (logical px) in its parent.
    pub fn new(surface: S, bounds: Rect, scale_factor: f32, config: InkConfig) -> Self {
        let mut engine = Self {
            surface,
            bounds: Rect::default(),
            config,
            state: CaptureState::Idle,
            record: StrokeRecord::new(),
            next_id: 1,
            styles: StyleResolver::default(),
        };
        engine.resize(bounds, scale_factor);
        engine
    }

    /// Applies a new surface placement and redraws all ink.
    ///
    /// Zero-area or non-finite geometry is ignored and the previous size stays.
    pub fn resize(&mut self, bounds: Rect, scale_factor: f32) {
        let size = SurfaceSize::new(bounds.width(), bounds.height(), scale_factor);
        if !bounds.is_finite() || !size.is_valid() {
            return;
        }
        self.bounds = bounds;
        self.surface.configure(size);
        self.redraw();
    }

    /// Feeds one pointer event through the state machine.
    pub fn handle<P: PointerSource + ?Sized>(&mut self, event: &P) {
        match (event.phase(), self.is_drawing()) {
            (PointerPhase::Down, false) => self.begin(event),
            (PointerPhase::Move, true) => self.extend(event),
            (PointerPhase::Up | PointerPhase::Leave | PointerPhase::Cancel, true) => self.finish(event),
            _ => {}
        }
    }

    /// Clears the record and the visible ink; any gesture in progress is dropped.
    pub fn reset(&mut self) {
        self.record.clear();
        self.state = CaptureState::Idle;
        self.surface.clear();
        log::debug!("capture reset");
    }

    /// A copy of the captured signature, or `None` if nothing was signed.
    pub fn record(&self) -> Option<StrokeRecord> {
        (!self.record.is_empty()).then(|| self.record.clone())
    }

    /// Color for strokes started from now on.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.config.color = color.into();
    }

    /// Width for strokes started from now on. Non-positive or non-finite widths are rejected.
    pub fn set_width(&mut self, width: f32) {
        if !(width.is_finite() && width > 0.0) {
            log::warn!("ignoring ink width {width}; keeping {}", self.config.width);
            return;
        }
        self.config.width = width;
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, CaptureState::Drawing { .. })
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn config(&self) -> &InkConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    // ── transitions ────────────────────────────────────────────────────────

    fn begin<P: PointerSource + ?Sized>(&mut self, event: &P) {
        let Some(sample) = event.sample(None) else { return };
        let at = self.bounds.to_local(sample.location);
        if !at.is_finite() || !sample.timestamp.is_finite() {
            return;
        }

        let id = format!("s{}", self.next_id);
        self.next_id += 1;

        let stroke = Stroke::new(id, self.config.color.clone(), self.config.width)
            .with_points([Point::new(at.x, at.y, sample.timestamp)]);
        self.state = CaptureState::Drawing { stroke, last: at, contact: sample.contact };
    }

    fn extend<P: PointerSource + ?Sized>(&mut self, event: &P) {
        let CaptureState::Drawing { stroke, last, contact } = &mut self.state else { return };
        let Some(sample) = event.sample(*contact) else { return };
        if sample.contact != *contact {
            return;
        }
        let at = self.bounds.to_local(sample.location);
        if !at.is_finite() || !sample.timestamp.is_finite() {
            return;
        }

        let style = self.styles.for_stroke(stroke);
        self.surface.draw_segment(*last, at, &style);
        stroke.points.push(Point::new(at.x, at.y, sample.timestamp));
        *last = at;
    }

    fn finish<P: PointerSource + ?Sized>(&mut self, event: &P) {
        if let CaptureState::Drawing { contact, .. } = &self.state {
            // A lifted finger that is not ours leaves the gesture alone.
            if contact.is_some() && event.sample(*contact).is_none() {
                return;
            }
        }

        let CaptureState::Drawing { stroke, .. } = std::mem::replace(&mut self.state, CaptureState::Idle) else {
            return;
        };

        if stroke.is_drawable() {
            log::debug!("stroke {} committed ({} points)", stroke.id, stroke.points.len());
            self.record.push(stroke);
        } else {
            log::debug!("stroke {} discarded (single point)", stroke.id);
        }
        self.redraw();
    }

    /// Clears and repaints every committed stroke, then any stroke in progress.
    fn redraw(&mut self) {
        self.surface.clear();
        for stroke in self.record.iter() {
            let style = self.styles.for_stroke(stroke);
            self.surface.draw_polyline(&stroke_path(stroke), &style);
        }
        if let CaptureState::Drawing { stroke, .. } = &self.state {
            let style = self.styles.for_stroke(stroke);
            self.surface.draw_polyline(&stroke_path(stroke), &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use autograph_engine::paint::Color;

    use crate::pointer::{MouseActivity, TouchActivity};
    use crate::surface::InkCanvas;

    use super::*;

    const BOUNDS: Rect = Rect::new(10.0, 20.0, 300.0, 150.0);

    fn engine() -> CaptureEngine<InkCanvas> {
        CaptureEngine::new(InkCanvas::new(), BOUNDS, 1.0, InkConfig::default())
    }

    /// Mouse event at a surface-local position.
    fn mouse(phase: PointerPhase, x: f32, y: f32, t: f64) -> MouseActivity {
        MouseActivity::new(phase, Vec2::new(x + BOUNDS.origin.x, y + BOUNDS.origin.y), t)
    }

    fn gesture(e: &mut CaptureEngine<InkCanvas>, pts: &[(f32, f32, f64)]) {
        let (first, rest) = pts.split_first().unwrap();
        e.handle(&mouse(PointerPhase::Down, first.0, first.1, first.2));
        for &(x, y, t) in rest {
            e.handle(&mouse(PointerPhase::Move, x, y, t));
        }
        let (x, y, t) = *pts.last().unwrap();
        e.handle(&mouse(PointerPhase::Up, x, y, t));
    }

    // ── gestures ──────────────────────────────────────────────────────────

    #[test]
    fn gesture_becomes_stroke_in_local_coords() {
        let mut e = engine();
        gesture(&mut e, &[(1.0, 2.0, 100.0), (5.0, 6.0, 116.0), (9.0, 9.0, 132.0)]);

        let rec = e.record().unwrap();
        assert_eq!(rec.len(), 1);
        let s = &rec.strokes()[0];
        assert_eq!(s.points[0], Point::new(1.0, 2.0, 100.0));
        assert_eq!(s.points[2], Point::new(9.0, 9.0, 132.0));
        assert!(s.points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(rec.validate().is_ok());
        assert!(!e.is_drawing());
    }

    #[test]
    fn moves_ink_immediately() {
        let mut e = engine();
        e.handle(&mouse(PointerPhase::Down, 0.0, 0.0, 0.0));
        assert!(e.surface().list().is_empty());

        e.handle(&mouse(PointerPhase::Move, 3.0, 4.0, 8.0));
        assert_eq!(e.surface().segment_coords(), vec![((0.0, 0.0), (3.0, 4.0))]);
        assert!(e.record().is_none(), "stroke is not committed before release");
    }

    #[test]
    fn single_point_gesture_leaves_nothing() {
        let mut e = engine();
        e.handle(&mouse(PointerPhase::Down, 40.0, 40.0, 0.0));
        e.handle(&mouse(PointerPhase::Up, 40.0, 40.0, 90.0));

        assert!(e.record().is_none());
        assert!(e.surface().list().is_empty());
        assert_eq!(e.state(), &CaptureState::Idle);
    }

    #[test]
    fn two_strokes_keep_order_and_unique_ids() {
        let mut e = engine();
        gesture(&mut e, &[(0.0, 0.0, 0.0), (10.0, 0.0, 50.0), (20.0, 5.0, 120.0)]);
        gesture(&mut e, &[(100.0, 0.0, 5000.0), (110.0, 10.0, 5040.0)]);

        let rec = e.record().unwrap();
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.strokes()[0].points.len(), 3);
        assert_eq!(rec.strokes()[1].points.len(), 2);
        assert_ne!(rec.strokes()[0].id, rec.strokes()[1].id);

        // No segment ever joins the end of A to the start of B.
        let joined = ((20.0, 5.0), (100.0, 0.0));
        assert!(!e.surface().segment_coords().contains(&joined));
    }

    #[test]
    fn leave_and_cancel_finalize() {
        let mut e = engine();
        e.handle(&mouse(PointerPhase::Down, 0.0, 0.0, 0.0));
        e.handle(&mouse(PointerPhase::Move, 1.0, 1.0, 1.0));
        e.handle(&mouse(PointerPhase::Leave, 1.0, 1.0, 2.0));
        assert_eq!(e.record().map(|r| r.len()), Some(1));

        e.handle(&mouse(PointerPhase::Down, 0.0, 0.0, 3.0));
        e.handle(&mouse(PointerPhase::Move, 2.0, 2.0, 4.0));
        e.handle(&mouse(PointerPhase::Cancel, 2.0, 2.0, 5.0));
        assert_eq!(e.record().map(|r| r.len()), Some(2));
    }

    #[test]
    fn stray_events_are_ignored() {
        let mut e = engine();
        e.handle(&mouse(PointerPhase::Move, 1.0, 1.0, 0.0));
        e.handle(&mouse(PointerPhase::Up, 1.0, 1.0, 0.0));
        assert_eq!(e.state(), &CaptureState::Idle);

        e.handle(&mouse(PointerPhase::Down, 0.0, 0.0, 1.0));
        e.handle(&mouse(PointerPhase::Down, 50.0, 50.0, 2.0));
        let CaptureState::Drawing { stroke, .. } = e.state() else { panic!("expected drawing") };
        assert_eq!(stroke.points.len(), 1);
        assert_eq!(stroke.points[0].x, 0.0);
    }

    // ── touch ─────────────────────────────────────────────────────────────

    #[test]
    fn touch_tracks_first_contact_only() {
        let mut e = engine();
        let at = |x: f32| Vec2::new(x + BOUNDS.origin.x, BOUNDS.origin.y);

        e.handle(&TouchActivity::single(PointerPhase::Down, 7, at(0.0), 0.0));
        e.handle(&TouchActivity::single(PointerPhase::Move, 8, at(90.0), 5.0));
        e.handle(&TouchActivity::single(PointerPhase::Move, 7, at(10.0), 10.0));
        e.handle(&TouchActivity::single(PointerPhase::Up, 8, at(90.0), 12.0));
        assert!(e.is_drawing(), "another finger lifting does not end the stroke");

        e.handle(&TouchActivity::single(PointerPhase::Up, 7, at(10.0), 15.0));
        let rec = e.record().unwrap();
        let xs: Vec<f32> = rec.strokes()[0].points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 10.0]);
    }

    #[test]
    fn mouse_cannot_continue_touch_stroke() {
        let mut e = engine();
        e.handle(&TouchActivity::single(PointerPhase::Down, 1, Vec2::new(20.0, 30.0), 0.0));
        e.handle(&mouse(PointerPhase::Move, 50.0, 50.0, 4.0));
        let CaptureState::Drawing { stroke, .. } = e.state() else { panic!("expected drawing") };
        assert_eq!(stroke.points.len(), 1);
    }

    // ── configuration ─────────────────────────────────────────────────────

    #[test]
    fn ink_changes_apply_to_next_stroke() {
        let mut e = engine();
        e.handle(&mouse(PointerPhase::Down, 0.0, 0.0, 0.0));
        e.set_color("#ff0000");
        e.set_width(6.0);
        e.handle(&mouse(PointerPhase::Move, 1.0, 0.0, 1.0));
        e.handle(&mouse(PointerPhase::Up, 1.0, 0.0, 2.0));
        gesture(&mut e, &[(0.0, 9.0, 10.0), (4.0, 9.0, 11.0)]);

        let rec = e.record().unwrap();
        assert_eq!(rec.strokes()[0].color, "#1a1a2e");
        assert_eq!(rec.strokes()[0].width, 2.5);
        assert_eq!(rec.strokes()[1].color, "#ff0000");
        assert_eq!(rec.strokes()[1].width, 6.0);

        let last = e.surface().list().items().iter().last().unwrap();
        assert_eq!(last.style.color, Color::from_straight(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn invalid_width_is_rejected() {
        let mut e = engine();
        e.set_width(0.0);
        e.set_width(-1.0);
        e.set_width(f32::NAN);
        assert_eq!(e.config().width, 2.5);
    }

    // ── reset / resize ────────────────────────────────────────────────────

    #[test]
    fn reset_clears_record_and_ink() {
        let mut e = engine();
        gesture(&mut e, &[(0.0, 0.0, 0.0), (5.0, 5.0, 10.0)]);
        e.handle(&mouse(PointerPhase::Down, 9.0, 9.0, 20.0));

        e.reset();

        assert!(e.record().is_none());
        assert!(e.surface().list().is_empty());
        assert!(!e.is_drawing());
    }

    #[test]
    fn ids_stay_unique_across_reset() {
        let mut e = engine();
        gesture(&mut e, &[(0.0, 0.0, 0.0), (5.0, 5.0, 10.0)]);
        let first = e.record().unwrap().strokes()[0].id.clone();
        e.reset();
        gesture(&mut e, &[(0.0, 0.0, 0.0), (5.0, 5.0, 10.0)]);
        assert_ne!(e.record().unwrap().strokes()[0].id, first);
    }

    #[test]
    fn resize_redraws_identical_segments() {
        let mut e = engine();
        gesture(&mut e, &[(0.0, 0.0, 0.0), (10.0, 0.0, 50.0), (20.0, 5.0, 120.0)]);
        gesture(&mut e, &[(100.0, 0.0, 5000.0), (110.0, 10.0, 5040.0)]);
        let before = e.surface().list().items().iter().cloned().collect::<Vec<_>>();
        let record = e.record();

        e.resize(Rect::new(10.0, 20.0, 600.0, 300.0), 2.0);

        let after = e.surface().list().items().iter().cloned().collect::<Vec<_>>();
        assert_eq!(before, after);
        assert_eq!(e.record(), record);
        assert_eq!(e.surface().backing(), (1200, 600));
    }

    #[test]
    fn degenerate_resize_is_ignored() {
        let mut e = engine();
        gesture(&mut e, &[(0.0, 0.0, 0.0), (5.0, 5.0, 10.0)]);

        e.resize(Rect::new(0.0, 0.0, 0.0, 100.0), 1.0);
        e.resize(Rect::new(0.0, 0.0, f32::NAN, 100.0), 1.0);
        e.resize(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0);

        assert_eq!(e.bounds(), BOUNDS);
        assert_eq!(e.surface().backing(), (300, 150));
        assert_eq!(e.surface().list().len(), 1);
    }

    #[test]
    fn stroke_in_progress_survives_resize() {
        let mut e = engine();
        e.handle(&mouse(PointerPhase::Down, 0.0, 0.0, 0.0));
        e.handle(&mouse(PointerPhase::Move, 5.0, 0.0, 8.0));
        e.resize(BOUNDS, 2.0);
        assert_eq!(e.surface().list().len(), 1);
        assert!(e.is_drawing());
    }
}
