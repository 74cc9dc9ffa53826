//! Static and animated rendering of a finished record.

use autograph_engine::coords::{Rect, SurfaceSize};
use autograph_engine::scene::InkStyle;
use autograph_record::StrokeRecord;

use crate::config::ReplayConfig;
use crate::scheduler::{FrameQueue, FrameRequest, FrameScheduler};
use crate::surface::{stroke_path, InkSurface, StyleResolver};
use crate::timeline::ReplayTimeline;

/// Playback in flight.
struct Animation {
    timeline: ReplayTimeline,
    /// Resolved pen per stroke index.
    styles: Vec<InkStyle>,
    /// Entries up to and including this index have been committed.
    cursor: usize,
    /// Frame time of the first frame.
    start_ms: Option<f64>,
    pending: FrameRequest,
}

/// Draws records onto `surface`, either all at once or animated in
/// capture order, paced by display frames from `scheduler`.
pub struct ReplayEngine<S: InkSurface, F: FrameScheduler = FrameQueue> {
    surface: S,
    bounds: Rect,
    scheduler: F,
    config: ReplayConfig,
    /// Last record rendered or played; re-rendered on resize.
    current: Option<StrokeRecord>,
    animation: Option<Animation>,
    styles: StyleResolver,
}

impl<S: InkSurface, F: FrameScheduler> ReplayEngine<S, F> {
    pub fn new(surface: S, bounds: Rect, scale_factor: f32, scheduler: F, config: ReplayConfig) -> Self {
        let mut engine = Self {
            surface,
            bounds: Rect::default(),
            scheduler,
            config,
            current: None,
            animation: None,
            styles: StyleResolver::default(),
        };
        engine.resize(bounds, scale_factor);
        engine
    }

    /// Clears the surface and draws every stroke of `record` in full.
    ///
    /// Cancels any animation in flight. Calling it twice draws the same thing twice.
    pub fn render_static(&mut self, record: &StrokeRecord) {
        self.stop();
        self.current = Some(record.clone());
        self.draw_current();
    }

    /// Starts an animated replay of `record`.
    ///
    /// Does nothing while another replay is running or when `record` is empty.
    /// Records with fewer than two points are rendered statically instead.
    pub fn play(&mut self, record: &StrokeRecord) {
        if self.is_playing() || record.is_empty() {
            return;
        }

        let Some(timeline) = ReplayTimeline::build(record, self.config.max_duration_ms) else {
            self.render_static(record);
            return;
        };

        let styles = record.iter().map(|s| self.styles.for_stroke(s)).collect();
        self.current = Some(record.clone());
        self.surface.clear();

        log::debug!(
            "replay started: {} points over {:.0} ms (x{:.2})",
            timeline.entries().len(),
            timeline.duration(),
            timeline.speed()
        );

        let pending = self.scheduler.request_frame();
        self.animation = Some(Animation { timeline, styles, cursor: 0, start_ms: None, pending });
    }

    /// Cancels a running replay. Ink drawn so far stays on the surface.
    pub fn stop(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.scheduler.cancel_frame(animation.pending);
            log::debug!("replay cancelled at entry {}", animation.cursor);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.animation.is_some()
    }

    /// Applies a new surface placement and re-renders the final image of the
    /// current record. A replay in flight is cancelled.
    pub fn resize(&mut self, bounds: Rect, scale_factor: f32) {
        let size = SurfaceSize::new(bounds.width(), bounds.height(), scale_factor);
        if !bounds.is_finite() || !size.is_valid() {
            return;
        }
        self.stop();
        self.bounds = bounds;
        self.surface.configure(size);
        self.draw_current();
    }

    /// Frame callback for a request made through the scheduler.
    ///
    /// Requests that are no longer pending (cancelled, superseded) are ignored.
    pub fn on_frame(&mut self, request: FrameRequest, now_ms: f64) {
        let Some(animation) = self.animation.as_mut() else { return };
        if animation.pending != request {
            log::trace!("ignoring stale frame request {}", request.id());
            return;
        }

        let start = *animation.start_ms.get_or_insert(now_ms);
        let signature_time = animation.timeline.signature_time((now_ms - start).max(0.0));

        let entries = animation.timeline.entries();
        while animation.cursor + 1 < entries.len() && entries[animation.cursor + 1].timestamp <= signature_time {
            let a = entries[animation.cursor];
            let b = entries[animation.cursor + 1];
            // Consecutive in time but from different strokes: a pen lift, not ink.
            if a.stroke == b.stroke {
                self.surface.draw_segment(a.position, b.position, &animation.styles[a.stroke]);
            }
            animation.cursor += 1;
        }

        if signature_time >= animation.timeline.last() {
            self.animation = None;
            self.draw_current();
            log::debug!("replay finished");
        } else {
            animation.pending = self.scheduler.request_frame();
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    /// Record shown by the last `render_static` or `play`.
    pub fn current(&self) -> Option<&StrokeRecord> {
        self.current.as_ref()
    }

    fn draw_current(&mut self) {
        self.surface.clear();
        let Some(record) = self.current.as_ref() else { return };
        for stroke in record.iter().filter(|s| s.is_drawable()) {
            let style = self.styles.for_stroke(stroke);
            self.surface.draw_polyline(&stroke_path(stroke), &style);
        }
    }
}

impl<S: InkSurface> ReplayEngine<S, FrameQueue> {
    /// Dispatches the due frame request, if any. Call once per presented frame.
    pub fn pump(&mut self, now_ms: f64) {
        if let Some(request) = self.scheduler.take_due() {
            self.on_frame(request, now_ms);
        }
    }
}

impl<S: InkSurface, F: FrameScheduler> Drop for ReplayEngine<S, F> {
    fn drop(&mut self) {
        self.stop();
    }
}
