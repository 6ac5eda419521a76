use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{logical_viewport, App, AppControl, FrameCtx, LoadCtx, UpdateCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::InputState;
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "vampire".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until the window closes or the app
    /// asks to exit.
    ///
    /// Returns the first fatal error, including an `App::on_load` failure.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    input: InputState,
    clock: FrameClock,
    viewport: Viewport,

    exit_requested: bool,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            input: InputState::default(),
            clock: FrameClock::default(),
            viewport: Viewport::default(),
            exit_requested: false,
            failure: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        self.request_exit(event_loop);
    }

    /// Creates the window and GPU context, then runs `App::on_load`.
    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |window: &Window| pollster::block_on(Gpu::new(window, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let viewport = logical_viewport(entry.borrow_window());
        log::info!(
            "window \"{}\" created ({}x{} logical px)",
            self.config.title,
            viewport.width,
            viewport.height
        );

        let app = &mut self.app;
        entry
            .with_gpu(|gpu| {
                app.on_load(&LoadCtx {
                    device: gpu.device(),
                    surface_format: gpu.surface_format(),
                    viewport,
                })
            })
            .context("game failed to load")?;

        entry.borrow_window().request_redraw();
        self.viewport = viewport;
        self.entry = Some(entry);
        Ok(())
    }

    /// Propagates a window size change to the app, skipping zero-sized
    /// (minimized) viewports.
    fn sync_viewport(&mut self) {
        let Some(entry) = self.entry.as_ref() else { return };

        let viewport = logical_viewport(entry.borrow_window());
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;

        if viewport.is_valid() {
            log::debug!("resized to {}x{} logical px", viewport.width, viewport.height);
            self.app.on_resize(viewport);
        }
    }

    /// update → render → present for one frame.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.viewport.is_valid() {
            return;
        }

        let time = self.clock.tick();

        let control = self.app.on_update(&UpdateCtx {
            input: &self.input,
            time,
        });
        if control == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        let (app, input) = (&mut self.app, &self.input);
        let Some(entry) = self.entry.as_mut() else { return };

        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                input,
                time,
            };
            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(err) = self.create_window_entry(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the game renders every frame.
        if let Some(entry) = self.entry.as_ref() {
            entry.borrow_window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_ref() else { return };
        let scale_factor = entry.borrow_window().scale_factor();

        if let Some(ev) = translate_window_event(scale_factor, &self.input, &event) {
            self.input.apply_event(&ev);
            if self.app.on_input(&ev, &self.input) == AppControl::Exit {
                self.request_exit(event_loop);
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.borrow_window().request_redraw();
                }
                self.sync_viewport();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.borrow_window().inner_size();
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
                self.sync_viewport();
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Drop the surface before the window it borrows goes away with the loop.
        self.entry = None;
        log::info!("event loop exiting");
    }
}
