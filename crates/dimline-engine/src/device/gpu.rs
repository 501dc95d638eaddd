use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::surface_config;
use super::{GpuInit, SurfaceErrorAction};

/// Device, queue and swapchain of one window.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// Zero-sized framebuffer; the surface keeps its last configuration.
    minimized: bool,
}

/// One acquired swapchain image with the encoder recording into it.
pub struct GpuFrame {
    /// Swapchain image; presenting consumes it.
    pub output: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;
        let info = adapter.get_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("dimline device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to open wgpu device")?;

        let config = surface_config(&surface.get_capabilities(&adapter), size, &init)
            .context("surface reports no supported formats")?;
        if !config.format.is_srgb() {
            log::warn!("surface format {:?} is not sRGB; arrow colors will look darker", config.format);
        }
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            minimized: false,
        })
    }

    #[inline]
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    #[inline]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[inline]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Follows the framebuffer size. Zero sizes only mark the surface minimized.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.minimized = size.width == 0 || size.height == 0;
        if self.minimized {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn acquire(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("dimline frame"),
            });
        Ok(GpuFrame { output, view, encoder })
    }

    pub fn present(&self, frame: GpuFrame) {
        let GpuFrame { output, view, encoder } = frame;
        self.queue.submit([encoder.finish()]);
        drop(view);
        output.present();
    }

    /// Classifies `err` and reconfigures a lost or outdated surface.
    pub fn recover(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::from(&err);
        match action {
            SurfaceErrorAction::Reconfigured if !self.minimized => {
                log::debug!("reconfiguring surface: {err}");
                self.surface.configure(&self.device, &self.config);
            }
            SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                log::debug!("skipping frame: {err}")
            }
            SurfaceErrorAction::Fatal => log::error!("fatal surface error: {err}"),
        }
        action
    }
}
