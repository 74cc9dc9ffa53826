use std::fmt;

use winit::event::WindowEvent;

use autograph_engine::coords::{Rect, Vec2};
use autograph_engine::core::{App as EngineApp, AppControl, FrameCtx};
use autograph_engine::device::GpuInit;
use autograph_engine::input::{
    ButtonState, InputEvent, Key, MouseButton, PointerButtonEvent, PointerMoveEvent, TimedEvent,
    TouchEvent, TouchPhase,
};
use autograph_engine::paint::Color;
use autograph_engine::render::SegmentRenderer;
use autograph_engine::scene::{DrawList, InkStyle, LineCap};
use autograph_engine::time::MonotonicClock;
use autograph_engine::window::{CursorIcon, Runtime, RuntimeConfig, RuntimeCtx};
use autograph_record::{RecordSink, RecordSource, StrokeRecord};

use crate::capture::{CaptureEngine, CaptureState};
use crate::config::PadConfig;
use crate::pointer::{MouseActivity, PointerPhase, TouchActivity};
use crate::replay::ReplayEngine;
use crate::scheduler::FrameQueue;
use crate::surface::InkCanvas;

/// Storage the pad submits to and loads from.
pub trait PadStore: RecordSink + RecordSource {}

impl<T: RecordSink + RecordSource> PadStore for T {}

// ── PadApplication ────────────────────────────────────────────────────────

/// Desktop signature pad builder.
///
/// ```rust,ignore
/// PadApplication::new()
///     .title("Sign here")
///     .ink_color("#0b3d91")
///     .store(DirStore::open("signatures")?)
///     .token("contract-42")
///     .run()?;
/// ```
///
/// Keys: `Space` replay, `S` show still, `Backspace`/`Delete` clear,
/// `Enter` submit, `Tab` back to signing, `Escape` quit.
pub struct PadApplication {
    runtime: RuntimeConfig,
    gpu: GpuInit,
    config: PadConfig,
    store: Option<Box<dyn PadStore>>,
    token: String,
    replay: Option<StrokeRecord>,
}

impl PadApplication {
    pub fn new() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            gpu: GpuInit::default(),
            config: PadConfig::default(),
            store: None,
            token: "signature".to_string(),
            replay: None,
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.runtime = self.runtime.title(t);
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.runtime = self.runtime.size(width, height);
        self
    }

    pub fn ink_color(mut self, color: impl Into<String>) -> Self {
        self.config.ink = self.config.ink.color(color);
        self
    }

    pub fn ink_width(mut self, width: f32) -> Self {
        self.config.ink = self.config.ink.width(width);
        self
    }

    pub fn config(mut self, config: PadConfig) -> Self {
        self.config = config;
        self
    }

    /// Where `Enter` submits the signature.
    pub fn store(mut self, store: impl PadStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Key the signature is submitted under.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Opens in replay mode and animates `record` once the window is up.
    pub fn replay(mut self, record: StrokeRecord) -> Self {
        self.replay = Some(record);
        self
    }

    /// Opens the window and blocks until it is closed.
    pub fn run(self) -> anyhow::Result<()> {
        let runtime = self.runtime.clone();
        let gpu = self.gpu.clone();
        Runtime::run(runtime, gpu, self.into_host())
    }

    fn into_host(self) -> PadHost {
        let mode = if self.replay.is_some() { Mode::Replay } else { Mode::Capture };
        PadHost {
            capture: CaptureEngine::new(InkCanvas::new(), Rect::default(), 1.0, self.config.ink.clone()),
            replay: ReplayEngine::new(InkCanvas::new(), Rect::default(), 1.0, FrameQueue::new(), self.config.replay),
            config: self.config,
            mode,
            window_rect: Rect::default(),
            guide: DrawList::new(),
            guide_renderer: SegmentRenderer::new(),
            capture_renderer: SegmentRenderer::new(),
            replay_renderer: SegmentRenderer::new(),
            clock: MonotonicClock::new(),
            resize_pending: true,
            store: self.store,
            token: self.token,
            autoplay: self.replay,
            base_title: self.runtime.title,
            shown_title: None,
        }
    }
}

impl Default for PadApplication {
    fn default() -> Self {
        Self::new()
    }
}

// ── PadHost ───────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Mode {
    Capture,
    Replay,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Capture => f.write_str("signing"),
            Mode::Replay => f.write_str("replay"),
        }
    }
}

/// Internal state that implements the engine `App` contract.
struct PadHost {
    config: PadConfig,
    mode: Mode,

    capture: CaptureEngine<InkCanvas>,
    replay: ReplayEngine<InkCanvas>,

    window_rect: Rect,
    guide: DrawList,

    // One renderer per draw list: each caches its list's last upload.
    guide_renderer: SegmentRenderer,
    capture_renderer: SegmentRenderer,
    replay_renderer: SegmentRenderer,

    clock: MonotonicClock,
    resize_pending: bool,

    store: Option<Box<dyn PadStore>>,
    token: String,
    autoplay: Option<StrokeRecord>,

    base_title: String,
    shown_title: Option<String>,
}

impl PadHost {
    /// Places the signing area inside a `width` x `height` window.
    fn layout(&mut self, width: f32, height: f32, scale_factor: f32) {
        self.resize_pending = false;

        let window = Rect::new(0.0, 0.0, width, height);
        let bounds = window.inset(self.config.margin);
        self.capture.resize(bounds, scale_factor);
        self.replay.resize(bounds, scale_factor);

        // Minimized windows keep the last usable layout.
        if bounds.is_empty() {
            return;
        }
        self.window_rect = window;
        self.guide = guide_lines(bounds);

        if let Some(record) = self.autoplay.take() {
            self.replay.play(&record);
        }
    }

    fn bounds(&self) -> Rect {
        self.capture.bounds()
    }

    fn apply_input(&mut self, events: &[TimedEvent]) -> AppControl {
        for TimedEvent { at, event } in events {
            let t = self.clock.ms_at(*at);
            match event {
                InputEvent::Key { key, state: ButtonState::Pressed, repeat: false, .. } => {
                    if self.on_key(*key, t) == AppControl::Exit {
                        return AppControl::Exit;
                    }
                }
                InputEvent::Focused(false) => self.cancel_gesture(t),
                _ if self.mode == Mode::Capture => self.on_pointer(event, t),
                _ => {}
            }
        }
        AppControl::Continue
    }

    fn on_pointer(&mut self, event: &InputEvent, t: f64) {
        let bounds = self.bounds();
        match event {
            InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, x, y, .. }) => {
                let at = Vec2::new(*x, *y);
                let phase = match state {
                    ButtonState::Pressed if bounds.contains(at) => PointerPhase::Down,
                    ButtonState::Pressed => return,
                    ButtonState::Released => PointerPhase::Up,
                };
                self.capture.handle(&MouseActivity::new(phase, at, t));
            }
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                let at = Vec2::new(*x, *y);
                let phase = if bounds.contains(at) { PointerPhase::Move } else { PointerPhase::Leave };
                self.capture.handle(&MouseActivity::new(phase, at, t));
            }
            InputEvent::PointerLeft => {
                self.capture.handle(&MouseActivity::new(PointerPhase::Leave, Vec2::zero(), t));
            }
            InputEvent::Touch(TouchEvent { id, phase, x, y }) => {
                let at = Vec2::new(*x, *y);
                let phase = match phase {
                    TouchPhase::Started if bounds.contains(at) => PointerPhase::Down,
                    TouchPhase::Started => return,
                    TouchPhase::Moved if bounds.contains(at) => PointerPhase::Move,
                    TouchPhase::Moved => PointerPhase::Leave,
                    TouchPhase::Ended => PointerPhase::Up,
                    TouchPhase::Cancelled => PointerPhase::Cancel,
                };
                self.capture.handle(&TouchActivity::single(phase, *id, at, t));
            }
            _ => {}
        }
    }

    /// Ends whatever gesture is in progress, mouse or touch.
    fn cancel_gesture(&mut self, t: f64) {
        match self.capture.state() {
            CaptureState::Drawing { contact: Some(id), last, .. } => {
                let at = self.bounds().origin + *last;
                let cancel = TouchActivity::single(PointerPhase::Cancel, *id, at, t);
                self.capture.handle(&cancel);
            }
            CaptureState::Drawing { contact: None, .. } => {
                self.capture.handle(&MouseActivity::new(PointerPhase::Cancel, Vec2::zero(), t));
            }
            CaptureState::Idle => {}
        }
    }

    fn on_key(&mut self, key: Key, t: f64) -> AppControl {
        match key {
            Key::Escape => return AppControl::Exit,
            Key::Space | Key::R => {
                self.cancel_gesture(t);
                self.start_replay();
            }
            Key::S => {
                self.cancel_gesture(t);
                self.show_still();
            }
            Key::Backspace | Key::Delete | Key::C => self.clear(),
            Key::Enter => self.submit(),
            Key::Tab => {
                self.replay.stop();
                self.mode = Mode::Capture;
            }
            _ => {}
        }
        AppControl::Continue
    }

    /// The freshly captured signature, else the one loaded for replay.
    fn signature(&self) -> Option<StrokeRecord> {
        self.capture.record().or_else(|| self.replay.current().cloned())
    }

    fn start_replay(&mut self) {
        let Some(record) = self.signature() else {
            log::info!("nothing to replay");
            return;
        };
        self.mode = Mode::Replay;
        self.replay.play(&record);
    }

    fn show_still(&mut self) {
        let Some(record) = self.signature() else {
            log::info!("nothing to show");
            return;
        };
        self.mode = Mode::Replay;
        self.replay.render_static(&record);
    }

    fn clear(&mut self) {
        self.replay.stop();
        self.capture.reset();
        self.mode = Mode::Capture;
    }

    fn submit(&mut self) {
        let Some(store) = self.store.as_mut() else {
            log::warn!("no store configured; signature not submitted");
            return;
        };
        let Some(record) = self.capture.record() else {
            log::warn!("not signed; nothing submitted");
            return;
        };
        match store.submit(&self.token, &record) {
            Ok(()) => log::debug!("submitted {} strokes under {:?}", record.len(), self.token),
            Err(e) => log::error!("failed to submit signature {:?}: {e}", self.token),
        }
    }

    fn sync_title(&mut self, runtime: &mut RuntimeCtx) {
        let title = format!("{} ({})", self.base_title, self.mode);
        if self.shown_title.as_deref() != Some(title.as_str()) {
            runtime.set_title(title.clone());
            self.shown_title = Some(title);
        }
    }
}

impl EngineApp for PadHost {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if matches!(event, WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. }) {
            self.resize_pending = true;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.resize_pending {
            let (w, h) = ctx.window.logical_size();
            self.layout(w, h, ctx.window.scale_factor());
        }

        if self.apply_input(&ctx.input_frame.events) == AppControl::Exit {
            return AppControl::Exit;
        }

        self.replay.pump(self.clock.ms_at(ctx.time.now));
        self.sync_title(ctx.runtime);

        ctx.window.set_cursor(match self.mode {
            Mode::Capture => CursorIcon::Crosshair,
            Mode::Replay => CursorIcon::Default,
        });

        // ── Render ────────────────────────────────────────────────────────
        let bounds = self.bounds();
        let window = self.window_rect;
        let guide = &self.guide;
        let guide_renderer = &mut self.guide_renderer;
        let (ink, ink_renderer) = match self.mode {
            Mode::Capture => (self.capture.surface().list(), &mut self.capture_renderer),
            Mode::Replay => (self.replay.surface().list(), &mut self.replay_renderer),
        };

        ctx.render(self.config.background, |rctx, target| {
            guide_renderer.render(rctx, target, guide, window);
            ink_renderer.render(rctx, target, ink, bounds);
        })
    }
}

/// Frame and signing baseline around `bounds`, in window coordinates.
fn guide_lines(bounds: Rect) -> DrawList {
    let mut list = DrawList::new();
    let frame = InkStyle::new(Color::from_srgb_u8(0xd8, 0xd8, 0xd2, 0xff), 1.0);
    let (min, max) = (bounds.origin, bounds.max());
    list.push_polyline(
        &[min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y), min],
        frame,
    );

    let baseline = InkStyle::new(Color::from_srgb_u8(0xb0, 0xb0, 0xa8, 0xff), 1.5).with_cap(LineCap::Butt);
    let y = min.y + bounds.height() * 0.72;
    let inset = bounds.width() * 0.08;
    list.push_segment(Vec2::new(min.x + inset, y), Vec2::new(max.x - inset, y), baseline);
    list
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use autograph_engine::input::Modifiers;
    use autograph_record::{MemoryStore, Point, Stroke};

    use super::*;

    /// 400 x 200 window, 24 px margin: signing area (24, 24) .. (376, 176).
    fn host() -> PadHost {
        let mut host = PadApplication::new().store(MemoryStore::new()).token("doc-1").into_host();
        host.layout(400.0, 200.0, 1.0);
        host
    }

    struct Script {
        t0: Instant,
        events: Vec<TimedEvent>,
    }

    impl Script {
        fn new() -> Self {
            Self { t0: Instant::now(), events: Vec::new() }
        }

        fn at(&mut self, ms: u64, event: InputEvent) -> &mut Self {
            self.events.push(TimedEvent { at: self.t0 + Duration::from_millis(ms), event });
            self
        }

        fn button(&mut self, ms: u64, state: ButtonState, x: f32, y: f32) -> &mut Self {
            let ev = PointerButtonEvent { button: MouseButton::Left, state, x, y, modifiers: Modifiers::default() };
            self.at(ms, InputEvent::PointerButton(ev))
        }

        fn moved(&mut self, ms: u64, x: f32, y: f32) -> &mut Self {
            self.at(ms, InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }

        fn key(&mut self, ms: u64, key: Key) -> &mut Self {
            let ev = InputEvent::Key {
                key,
                state: ButtonState::Pressed,
                modifiers: Modifiers::default(),
                repeat: false,
            };
            self.at(ms, ev)
        }

        fn drag(&mut self, ms: u64) -> &mut Self {
            self.moved(ms, 50.0, 50.0)
                .button(ms, ButtonState::Pressed, 50.0, 50.0)
                .moved(ms + 16, 60.0, 55.0)
                .moved(ms + 32, 70.0, 52.0)
                .button(ms + 40, ButtonState::Released, 70.0, 52.0)
        }
    }

    #[test]
    fn layout_insets_the_signing_area() {
        let h = host();
        assert_eq!(h.bounds(), Rect::new(24.0, 24.0, 352.0, 152.0));
        assert_eq!(h.guide.len(), 5);
    }

    #[test]
    fn mouse_drag_is_captured_relative_to_the_pad() {
        let mut h = host();
        let mut s = Script::new();
        s.drag(0);
        assert_eq!(h.apply_input(&s.events), AppControl::Continue);

        let rec = h.capture.record().unwrap();
        let pts = &rec.strokes()[0].points;
        assert_eq!(pts.len(), 3);
        assert_eq!((pts[0].x, pts[0].y), (26.0, 26.0));
        assert!(pts[1].timestamp - pts[0].timestamp >= 15.0);
    }

    #[test]
    fn press_outside_the_pad_is_ignored() {
        let mut h = host();
        let mut s = Script::new();
        s.button(0, ButtonState::Pressed, 5.0, 5.0).moved(10, 50.0, 50.0);
        h.apply_input(&s.events);
        assert!(!h.capture.is_drawing());
    }

    #[test]
    fn leaving_the_pad_ends_the_stroke() {
        let mut h = host();
        let mut s = Script::new();
        s.button(0, ButtonState::Pressed, 50.0, 50.0)
            .moved(10, 60.0, 60.0)
            .moved(20, 390.0, 60.0)
            .moved(30, 80.0, 60.0);
        h.apply_input(&s.events);

        assert!(!h.capture.is_drawing());
        assert_eq!(h.capture.record().unwrap().point_count(), 2);
    }

    #[test]
    fn enter_submits_under_token() {
        let mut h = host();
        let mut s = Script::new();
        s.drag(0).key(100, Key::Enter);
        h.apply_input(&s.events);

        let store = h.store.as_ref().unwrap();
        let stored = store.fetch("doc-1").unwrap().unwrap();
        assert_eq!(Some(stored), h.capture.record());
    }

    #[test]
    fn enter_without_signature_stores_nothing() {
        let mut h = host();
        let mut s = Script::new();
        s.key(0, Key::Enter);
        h.apply_input(&s.events);
        assert_eq!(h.store.as_ref().unwrap().fetch("doc-1").unwrap(), None);
    }

    #[test]
    fn space_replays_and_tab_returns() {
        let mut h = host();
        let mut s = Script::new();
        s.drag(0).key(100, Key::Space);
        h.apply_input(&s.events);
        assert_eq!(h.mode, Mode::Replay);
        assert!(h.replay.is_playing());

        // Pointer input is ignored while replaying.
        let mut s = Script::new();
        s.drag(200).key(300, Key::Tab);
        h.apply_input(&s.events);
        assert_eq!(h.capture.record().unwrap().len(), 1);
        assert_eq!(h.mode, Mode::Capture);
        assert!(!h.replay.is_playing());
    }

    #[test]
    fn replay_key_mid_gesture_finishes_the_stroke() {
        let mut h = host();
        let mut s = Script::new();
        s.button(0, ButtonState::Pressed, 50.0, 50.0)
            .moved(16, 60.0, 55.0)
            .key(20, Key::Space)
            .button(30, ButtonState::Released, 60.0, 55.0)
            .key(40, Key::Tab)
            .moved(50, 70.0, 60.0)
            .moved(60, 80.0, 62.0);
        h.apply_input(&s.events);

        assert_eq!(h.mode, Mode::Capture);
        assert!(!h.capture.is_drawing());
        let rec = h.capture.record().unwrap();
        assert_eq!(rec.len(), 1);
        assert_eq!(rec.point_count(), 2);
    }

    #[test]
    fn still_key_mid_gesture_finishes_the_stroke() {
        let mut h = host();
        let mut s = Script::new();
        s.button(0, ButtonState::Pressed, 50.0, 50.0)
            .moved(16, 60.0, 55.0)
            .key(20, Key::S);
        h.apply_input(&s.events);

        assert_eq!(h.mode, Mode::Replay);
        assert!(!h.capture.is_drawing());
        assert_eq!(h.capture.record().unwrap().point_count(), 2);
    }

    #[test]
    fn backspace_clears() {
        let mut h = host();
        let mut s = Script::new();
        s.drag(0).key(100, Key::Backspace);
        h.apply_input(&s.events);
        assert!(h.capture.record().is_none());
        assert!(h.capture.surface().list().is_empty());
    }

    #[test]
    fn escape_exits() {
        let mut h = host();
        let mut s = Script::new();
        s.key(0, Key::Escape);
        assert_eq!(h.apply_input(&s.events), AppControl::Exit);
    }

    #[test]
    fn focus_loss_cancels_gesture() {
        let mut h = host();
        let mut s = Script::new();
        s.button(0, ButtonState::Pressed, 50.0, 50.0)
            .moved(10, 60.0, 60.0)
            .at(20, InputEvent::Focused(false));
        h.apply_input(&s.events);
        assert!(!h.capture.is_drawing());
        assert!(h.capture.record().is_some());
    }

    #[test]
    fn touch_draws_like_the_mouse() {
        let mut h = host();
        let mut s = Script::new();
        let touch = |phase, x| InputEvent::Touch(TouchEvent { id: 3, phase, x, y: 80.0 });
        s.at(0, touch(TouchPhase::Started, 40.0))
            .at(10, touch(TouchPhase::Moved, 50.0))
            .at(20, touch(TouchPhase::Ended, 50.0));
        h.apply_input(&s.events);
        assert_eq!(h.capture.record().unwrap().point_count(), 2);
    }

    #[test]
    fn loaded_record_autoplays_after_layout() {
        let rec = StrokeRecord::from_strokes(vec![
            Stroke::new("s1", "#000", 2.0)
                .with_points([Point::new(0.0, 0.0, 0.0), Point::new(10.0, 10.0, 400.0)]),
        ]);
        let mut h = PadApplication::new().replay(rec.clone()).into_host();
        assert_eq!(h.mode, Mode::Replay);
        assert!(!h.replay.is_playing());

        h.layout(400.0, 200.0, 1.0);
        assert!(h.replay.is_playing());
        assert_eq!(h.replay.current(), Some(&rec));
    }

    #[test]
    fn minimized_window_keeps_layout() {
        let mut h = host();
        h.layout(0.0, 0.0, 1.0);
        assert_eq!(h.bounds(), Rect::new(24.0, 24.0, 352.0, 152.0));
    }
}
