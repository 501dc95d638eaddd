use crate::camera::Camera;
use crate::coords::Resolution;

use super::DrawList;

/// What a node needs to know about the frame being drawn.
pub struct FrameView<'a> {
    /// Current render target size. `None` keeps whatever each renderable saw last.
    pub viewport: Option<Resolution>,
    pub camera: &'a dyn Camera,
}

impl<'a> FrameView<'a> {
    #[inline]
    pub fn new(viewport: Option<Resolution>, camera: &'a dyn Camera) -> Self {
        Self { viewport, camera }
    }
}

/// Attach point for the host's draw pass.
///
/// A node refreshes each of its renderables and records the resulting commands,
/// in the order they must be submitted.
pub trait SceneNode {
    fn record(&mut self, view: &FrameView<'_>, list: &mut DrawList);
}
