use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{ArrowUniform, PartPipeline};

const SHADER: &str = concat!(
    include_str!("shaders/projector.wgsl"),
    include_str!("shaders/arrowhead.wgsl"),
);

/// Arrowhead renderer: a triangle with a concave base, tip on the endpoint.
pub struct ArrowheadRenderer {
    pipeline: PartPipeline,
    uniforms: Vec<ArrowUniform>,
}

impl Default for ArrowheadRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrowheadRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: PartPipeline::new("arrowhead", SHADER),
            uniforms: Vec::new(),
        }
    }

    /// Renders every `DrawCmd::Arrowhead` in `draw_list`, in list order.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        self.uniforms.clear();
        self.uniforms.extend(draw_list.iter().filter_map(|item| match &item.cmd {
            DrawCmd::Arrowhead(cmd) if cmd.size.x > 0.0 && cmd.size.y > 0.0 => Some(ArrowUniform::from(cmd)),
            _ => None,
        }));
        self.pipeline.draw(ctx, target, &self.uniforms);
    }
}
