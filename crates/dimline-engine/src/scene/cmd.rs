use glam::{Vec2, Vec4};

use crate::scene::shapes::arrowhead::ArrowheadCmd;
use crate::scene::shapes::shaft::ShaftCmd;

/// Immutable per-frame snapshot of one renderable.
///
/// Produced by a refresh and consumed once by the matching renderer.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - add a matching renderer under `render::shapes::*`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Shaft(ShaftCmd),
    Arrowhead(ArrowheadCmd),
}

impl DrawCmd {
    /// CPU evaluation of the vertex stage for a quad corner.
    pub fn vertex(&self, local: Vec2) -> StageVertex {
        match self {
            DrawCmd::Shaft(c) => c.vertex(local),
            DrawCmd::Arrowhead(c) => c.vertex(local),
        }
    }

    /// Whether the pixel survives rasterization and the discard masks.
    pub fn covers(&self, pixel: Vec2) -> bool {
        match self {
            DrawCmd::Shaft(c) => c.covers(pixel),
            DrawCmd::Arrowhead(c) => c.covers(pixel),
        }
    }
}

/// Vertex stage output.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StageVertex {
    /// Homogeneous clip position (`@builtin(position)`).
    pub clip: Vec4,
    /// Position in pixels, origin bottom-left.
    pub pixel: Vec2,
}
