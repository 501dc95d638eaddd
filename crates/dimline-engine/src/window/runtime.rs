use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Resolution;
use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Redraw every frame. When `false`, frames are drawn on resize/expose only.
    pub continuous_redraw: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "dimline".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            continuous_redraw: true,
        }
    }
}

/// Runs one window until it closes or the app exits.
///
/// The runtime owns the window's viewport: it follows resizes, goes absent
/// while the window is minimized, and reaches the app through
/// [`FrameCtx::viewport`] and [`FrameCtx::view`].
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host {
            config,
            gpu_init,
            app,
            clock: FrameClock::new(),
            surface: None,
            viewport: None,
            failure: None,
        };

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        host.failure.map_or(Ok(()), Err)
    }
}

#[self_referencing]
struct Surface {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Host<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    clock: FrameClock,
    surface: Option<Surface>,
    viewport: Option<Resolution>,
    /// Setup error reported by `Runtime::run` once the loop stops.
    failure: Option<anyhow::Error>,
}

/// Viewport for a framebuffer size; minimized windows have none.
fn viewport_of(size: PhysicalSize<u32>) -> Option<Resolution> {
    Some(Resolution::from(size)).filter(|r| r.is_valid())
}

impl<A: App> Host<A> {
    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(self.config.initial_size);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let surface = SurfaceTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        self.viewport = surface.with_window(|w| viewport_of(w.inner_size()));
        if let Some(v) = self.viewport {
            log::info!("window ready: {}x{} px", v.width, v.height);
        }
        surface.with_window(|w| w.request_redraw());
        self.surface = Some(surface);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.with_gpu_mut(|gpu| gpu.resize(size));

        let viewport = viewport_of(size);
        match (self.viewport, viewport) {
            (Some(_), None) => log::debug!("window minimized; keeping last viewport"),
            // Time spent minimized is not animated.
            (None, Some(_)) => self.clock.reset(),
            _ => {}
        }
        self.viewport = viewport;
        surface.with_window(|w| w.request_redraw());
    }

    fn redraw(&mut self) -> AppControl {
        let Some(surface) = self.surface.as_mut() else {
            return AppControl::Continue;
        };
        let time = self.clock.tick();
        let viewport = self.viewport;
        let app = &mut self.app;

        surface.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                time,
                viewport,
            };
            app.on_frame(&mut ctx)
        })
    }
}

impl<A: App> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }
        if let Err(e) = self.open(event_loop) {
            log::error!("failed to open window: {e:#}");
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Nothing to draw while minimized.
        if self.config.continuous_redraw && self.viewport.is_some() {
            if let Some(surface) = &self.surface {
                surface.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.app.on_window_event(&event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                log::debug!("resized to {}x{}", size.width, size.height);
                self.resize(size);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.surface.as_ref().map(|s| s.with_window(|w| w.inner_size())) {
                    self.resize(size);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}
