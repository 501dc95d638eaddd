use std::f32::consts::TAU;

use anyhow::Result;
use dimline_engine::camera::LookAtCamera;
use dimline_engine::coords::Resolution;
use dimline_engine::core::{App, AppControl, FrameCtx};
use dimline_engine::device::GpuInit;
use dimline_engine::logging::{init_logging, LoggingConfig};
use dimline_engine::paint::Rgb;
use dimline_engine::render::shapes::arrowhead::ArrowheadRenderer;
use dimline_engine::render::shapes::shaft::ShaftRenderer;
use dimline_engine::scene::{ArrowEntity, ArrowError, ArrowParametersPatch, DrawList, SceneNode};
use dimline_engine::window::{Runtime, RuntimeConfig};
use glam::Vec3;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

const CLEAR: Rgb = Rgb::new(0.92, 0.92, 0.90);

/// Radians per second.
const ORBIT_SPEED: f32 = 0.25;
const ORBIT_RADIUS: f32 = 7.0;
const ORBIT_HEIGHT: f32 = 3.0;

/// Box being dimensioned: width x height x depth, one corner on the origin.
const BOX: Vec3 = Vec3::new(3.0, 1.5, 2.0);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Runtime::run(
        RuntimeConfig {
            title: "dimline studio".to_string(),
            initial_size: LogicalSize::new(1024.0, 700.0),
            ..Default::default()
        },
        GpuInit::default(),
        Studio::new(),
    )
}

struct Studio {
    camera: LookAtCamera,
    /// Built on the first frame, once the drawable size is known.
    arrows: Vec<ArrowEntity>,
    draw_list: DrawList,
    shaft_renderer: ShaftRenderer,
    arrowhead_renderer: ArrowheadRenderer,

    paused: bool,
    orbit: f32,
    phase: f32,
}

impl Studio {
    fn new() -> Self {
        Self {
            camera: LookAtCamera::perspective(45.0, 1.0, 0.1, 500.0),
            arrows: Vec::new(),
            draw_list: DrawList::new(),
            shaft_renderer: ShaftRenderer::new(),
            arrowhead_renderer: ArrowheadRenderer::new(),
            paused: false,
            orbit: 0.0,
            phase: 0.0,
        }
    }

    fn build_scene(resolution: Resolution) -> Result<Vec<ArrowEntity>, ArrowError> {
        let gap = Vec3::new(0.0, 0.0, 0.4);
        let width = ArrowEntity::new(
            Vec3::new(0.0, 0.0, BOX.z) + gap,
            Vec3::new(BOX.x, 0.0, BOX.z) + gap,
            ArrowParametersPatch::new(),
            resolution,
        )?;
        let depth = ArrowEntity::new(
            Vec3::new(BOX.x + 0.4, 0.0, 0.0),
            Vec3::new(BOX.x + 0.4, 0.0, BOX.z),
            ArrowParametersPatch::new()
                .color(Rgb::from_hex(0xC0392B))
                .shaft_pixel_width(6.0)
                .arrow_pixel_width(22.0)
                .arrow_pixel_height(36.0),
            resolution,
        )?;
        let height = ArrowEntity::new(
            Vec3::new(-0.4, 0.0, 0.0),
            Vec3::new(-0.4, BOX.y, 0.0),
            ArrowParametersPatch::new().color(Rgb::from_hex(0x1F618D)),
            resolution,
        )?;
        Ok(vec![width, depth, height])
    }

    fn animate(&mut self, dt: f32, resolution: Resolution) {
        if !self.paused {
            self.orbit = (self.orbit + dt * ORBIT_SPEED) % TAU;
            self.phase += dt;
        }

        let target = BOX * 0.5;
        let eye = target + Vec3::new(self.orbit.cos() * ORBIT_RADIUS, ORBIT_HEIGHT, self.orbit.sin() * ORBIT_RADIUS);
        self.camera.look_at(eye, target, Vec3::Y);
        self.camera.set_aspect_ratio(resolution.aspect_ratio());

        // The height arrow follows a bobbing lid; its shaft pulses to exercise
        // parameter updates between frames.
        if let Some(height) = self.arrows.get_mut(2) {
            let top = BOX.y * (1.0 + 0.3 * (self.phase * 1.5).sin());
            if let Err(e) = height.set_endpoints(Vec3::new(-0.4, 0.0, 0.0), Vec3::new(-0.4, top, 0.0)) {
                log::warn!("height arrow not moved: {e}");
            }
            height.parameters_mut().shaft_pixel_width = 8.0 + 4.0 * (self.phase * 3.0).sin();
        }
    }
}

impl App for Studio {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
            ..
        } = event
        else {
            return AppControl::Continue;
        };

        match code {
            KeyCode::Escape => AppControl::Exit,
            KeyCode::Space => {
                self.paused = !self.paused;
                log::info!("animation {}", if self.paused { "paused" } else { "resumed" });
                AppControl::Continue
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(resolution) = ctx.viewport else {
            return AppControl::Continue;
        };

        if self.arrows.is_empty() {
            match Self::build_scene(resolution) {
                Ok(arrows) => {
                    log::info!("scene ready: {} arrows", arrows.len());
                    self.arrows = arrows;
                }
                Err(e) => {
                    log::error!("failed to build scene: {e}");
                    return AppControl::Exit;
                }
            }
        }

        self.animate(ctx.time.dt, resolution);

        self.draw_list.clear();
        let view = ctx.view(&self.camera);
        for arrow in &mut self.arrows {
            arrow.record(&view, &mut self.draw_list);
        }

        let list = &self.draw_list;
        let shafts = &mut self.shaft_renderer;
        let heads = &mut self.arrowhead_renderer;

        ctx.render(CLEAR, |rctx, target| {
            shafts.render(rctx, target, list);
            heads.render(rctx, target, list);
        })
    }
}
