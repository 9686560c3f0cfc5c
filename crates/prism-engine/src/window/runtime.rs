use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, StartCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, InputFrame, InputState};
use crate::render::{BackendRef, WgpuBackend};
use crate::time::{FpsCounter, FramePacer};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Windowed size in logical pixels; ignored when fullscreen.
    pub width: u32,
    pub height: u32,
    /// Borderless fullscreen on the primary monitor at native resolution.
    pub fullscreen: bool,
    /// Frame-rate cap; 0 renders as fast as presentation allows.
    pub target_fps: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "3D".to_string(),
            width: 1280,
            height: 800,
            fullscreen: false,
            target_fps: 60,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU, starts `app` and drives frames
    /// until the window closes or the app exits.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.startup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    pacer: FramePacer,
    fps: FpsCounter,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    backend: Option<Rc<RefCell<WgpuBackend>>>,
    entry: Option<WindowEntry>,

    startup_error: Option<anyhow::Error>,
    events: Vec<InputEvent>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            backend: None,
            entry: None,
            startup_error: None,
            events: Vec::new(),
            exit_requested: false,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut attrs = Window::default_attributes().with_title(self.config.title.clone());
        attrs = if self.config.fullscreen {
            attrs.with_fullscreen(Some(Fullscreen::Borderless(event_loop.primary_monitor())))
        } else {
            attrs.with_inner_size(LogicalSize::new(self.config.width, self.config.height))
        };

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let now = Instant::now();
        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            pacer: FramePacer::new(self.config.target_fps),
            fps: FpsCounter::new(now),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let backend = Rc::new(RefCell::new(entry.with_gpu(|gpu| WgpuBackend::new(gpu))));
        let shared: BackendRef = backend.clone();

        entry.with(|fields| {
            let mut ctx = StartCtx {
                window: WindowCtx { window: fields.window },
                backend: shared,
            };
            self.app.on_start(&mut ctx)
        })?;

        log::info!("runtime started ({} fps cap)", self.config.target_fps);
        entry.with_window(|w| w.request_redraw());

        self.backend = Some(backend);
        self.entry = Some(entry);
        Ok(())
    }

    fn redraw(&mut self) -> AppControl {
        let (Some(entry), Some(backend)) = (self.entry.as_mut(), self.backend.as_ref()) else {
            return AppControl::Continue;
        };
        let app = &mut self.app;

        entry.with_mut(|fields| {
            fields.pacer.begin(Instant::now());

            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx { window: fields.window },
                    gpu: fields.gpu,
                    backend,
                    input_frame: fields.input_frame,
                };
                app.on_frame(&mut ctx)
            };

            fields.input_frame.clear();

            if let Some(fps) = fields.fps.tick(Instant::now()) {
                fields.window.set_title(&format!("FPS: {fps}"));
            }
            fields.pacer.wait();

            control
        })
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            log::error!("startup failed: {e:#}");
            self.startup_error = Some(e);
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the pacer bounds the rate.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let events = &mut self.events;
        entry.with_mut(|fields| {
            translate_window_event(fields.input_state, &event, events);
            for ev in events.drain(..) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }
}
