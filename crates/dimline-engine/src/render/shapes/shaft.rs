use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{ArrowUniform, PartPipeline};

const SHADER: &str = concat!(
    include_str!("shaders/projector.wgsl"),
    include_str!("shaders/shaft.wgsl"),
);

/// Shaft renderer.
///
/// Each shaft half is one quad rebuilt in pixel space by the vertex shader; the
/// fragment shader rounds the cap facing the arrowhead.
pub struct ShaftRenderer {
    pipeline: PartPipeline,
    uniforms: Vec<ArrowUniform>,
}

impl Default for ShaftRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaftRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: PartPipeline::new("shaft", SHADER),
            uniforms: Vec::new(),
        }
    }

    /// Renders every `DrawCmd::Shaft` in `draw_list`, in list order.
    ///
    /// Zero-width shafts are skipped.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        self.uniforms.clear();
        for item in draw_list.iter() {
            let DrawCmd::Shaft(cmd) = &item.cmd else { continue };
            if cmd.width <= 0.0 {
                continue;
            }
            self.uniforms.push(ArrowUniform::from(cmd));
        }
        self.pipeline.draw(ctx, target, &self.uniforms);
    }
}
