use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Title and initial logical size of the pad window.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "autograph".to_string(),
            initial_size: LogicalSize::new(720.0, 320.0),
        }
    }
}

impl RuntimeConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.initial_size = LogicalSize::new(width, height);
        self
    }
}

/// Requests an app can make of the runtime from inside `on_frame`.
///
/// They take effect once the callback has returned.
#[derive(Default)]
pub struct RuntimeCtx {
    title: Option<String>,
    exit: bool,
}

impl RuntimeCtx {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn exit(&mut self) {
        self.exit = true;
    }
}

/// Runs one window until it closes or the app asks to exit.
pub struct Runtime;

impl Runtime {
    /// Blocks on the event loop. Window or GPU bring-up failures are
    /// returned once the loop has wound down.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host {
            config,
            gpu_init,
            app,
            pad: None,
            failure: None,
        };
        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;
        host.failure.map_or(Ok(()), Err)
    }
}

/// The window together with the GPU surface borrowing it.
#[self_referencing]
struct PadWindow {
    input: InputState,
    pending: InputFrame,
    clock: FrameClock,
    window: Window,
    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl PadWindow {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        PadWindowTryBuilder {
            input: InputState::default(),
            pending: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    fn id(&self) -> WindowId {
        self.borrow_window().id()
    }

    fn request_redraw(&self) {
        self.borrow_window().request_redraw();
    }

    /// Matches the swapchain to the window's current physical size.
    fn sync_size(&mut self) {
        self.with_mut(|f| f.gpu.resize(f.window.inner_size()));
    }
}

struct Host<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    pad: Option<PadWindow>,
    failure: Option<anyhow::Error>,
}

impl<A: App + 'static> Host<A> {
    fn frame(&mut self) -> RuntimeCtx {
        let mut requests = RuntimeCtx::default();
        let Some(pad) = self.pad.as_mut() else {
            return requests;
        };
        let app = &mut self.app;

        pad.with_mut(|f| {
            let mut ctx = FrameCtx {
                window: WindowCtx { window: f.window },
                gpu: f.gpu,
                input: f.input,
                input_frame: f.pending,
                time: f.clock.tick(),
                runtime: &mut requests,
            };
            if app.on_frame(&mut ctx) == AppControl::Exit {
                requests.exit();
            }
            f.pending.clear();
        });
        requests
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, requests: RuntimeCtx) {
        if let (Some(title), Some(pad)) = (requests.title, self.pad.as_ref()) {
            pad.borrow_window().set_title(&title);
        }
        if requests.exit {
            event_loop.exit();
        }
    }
}

impl<A: App + 'static> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.pad.is_some() {
            return;
        }
        match PadWindow::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(pad) => {
                log::info!("window {:?} opened", pad.id());
                pad.request_redraw();
                self.pad = Some(pad);
            }
            Err(e) => {
                log::error!("failed to open window: {e:#}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        // Redraw every vsync so replay advances without further input.
        if let Some(pad) = self.pad.as_ref() {
            pad.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let received_at = Instant::now();
        let Some(pad) = self.pad.as_mut().filter(|p| p.id() == window_id) else {
            return;
        };

        pad.with_mut(|f| {
            if let Some(ev) = translate_window_event(f.window, f.input, &event) {
                f.input.apply_event(f.pending, received_at, ev);
            }
        });
        if self.app.on_window_event(&event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window {window_id:?} closed");
                self.pad = None;
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                pad.sync_size();
                pad.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let requests = self.frame();
                self.apply(event_loop, requests);
            }
            _ => {}
        }
    }
}
