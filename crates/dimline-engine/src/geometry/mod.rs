//! Pure geometry for constant-pixel-size arrows.
//!
//! Nothing here touches the GPU. The same math runs in the WGSL programs under
//! `render::shapes::shaders`; these functions are the tested reference and are
//! used by the draw commands to evaluate their stages on the CPU.

pub mod joint;
pub mod projector;
pub mod transform;

pub use joint::{JOINT_RADIUS_RATIO, arrowhead_joint_radius, joint_inset};
pub use projector::{ClipSegment, ndc, ndc_to_pixel, perpendicular, pixel_to_ndc_scale};
pub use transform::{CANONICAL_AXIS, MIN_SEGMENT_LENGTH, anchored_transform, segment_direction};
