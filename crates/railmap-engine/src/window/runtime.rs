use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

use super::translate;

/// Window settings for [`Runtime::run`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { title: "railmap".into(), initial_size: LogicalSize::new(1280.0, 720.0) }
    }
}

/// Requests an app can make from inside `on_frame`. They take effect once the
/// callback returns.
#[derive(Debug, Default)]
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

/// Runs one window, redrawn continuously, until it closes.
pub struct Runtime;

impl Runtime {
    /// Blocks until the window closes or `app` asks to exit.
    ///
    /// Fails when the event loop, the window or the GPU cannot be set up.
    pub fn run<A: App + 'static>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let mut handler = Handler { config, gpu_init, app, session: None, failure: None, exiting: false };

        event_loop.run_app(&mut handler).context("event loop failed")?;
        handler.app.on_exit();

        handler.failure.map_or(Ok(()), Err)
    }
}

/// The open window with its GPU surface and input bookkeeping.
#[self_referencing]
struct Session {
    input: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,
    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl Session {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.as_str())
            .with_inner_size(config.initial_size);
        let window = event_loop.create_window(attrs).context("failed to create window")?;

        SessionTryBuilder {
            input: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)).context("GPU setup failed"),
        }
        .try_build()
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }
}

struct Handler<A: App> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    session: Option<Session>,
    failure: Option<anyhow::Error>,
    exiting: bool,
}

impl<A: App> Handler<A> {
    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exiting = true;
        event_loop.exit();
    }

    /// Runs one app frame and applies its requests.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (app, Some(session)) = (&mut self.app, self.session.as_mut()) else { return };
        let mut runtime = RuntimeCtx::default();

        let control = session.with_mut(|s| {
            let mut ctx = FrameCtx {
                window: s.window,
                gpu: s.gpu,
                input: s.input,
                input_frame: s.input_frame,
                time: s.clock.tick(),
                runtime: &mut runtime,
            };
            let control = app.on_frame(&mut ctx);
            s.input_frame.clear();
            control
        });

        if let Some(title) = runtime.title.take() {
            session.with_window(|w| w.set_title(&title));
        }
        if control == AppControl::Exit || runtime.exit {
            self.exit(event_loop);
        }
    }
}

impl<A: App> ApplicationHandler for Handler<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match Session::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(session) => {
                log::info!("window open: {}", self.config.title);
                session.request_redraw();
                self.session = Some(session);
            }
            Err(err) => {
                log::error!("{err:#}");
                self.failure = Some(err);
                self.exit(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.exiting {
            return;
        }
        let (app, Some(session)) = (&mut self.app, self.session.as_mut()) else { return };

        let control = session.with_mut(|s| {
            let scale = s.window.scale_factor();
            if let Some(ev) = translate::input_event(&event, s.input, scale) {
                s.input.apply_event(s.input_frame, ev);
            }
            app.on_window_event(&event)
        });
        if control == AppControl::Exit {
            self.exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.session = None;
                self.exit(event_loop);
            }
            WindowEvent::Resized(size) => {
                session.with_gpu_mut(|gpu| gpu.resize(size));
                session.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = session.with_window(|w| w.inner_size());
                session.with_gpu_mut(|gpu| gpu.resize(size));
                session.request_redraw();
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }
        // Continuous redraw keeps transitions and polling moving.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(session) = &self.session {
            session.request_redraw();
        }
    }
}
