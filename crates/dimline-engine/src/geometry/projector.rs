//! Clip-space projector.
//!
//! Mirrored by `render/shapes/shaders/projector.wgsl`. Keep the two in sync.

use glam::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::coords::Resolution;

/// Screen-space deltas shorter than this (in pixels) have no usable direction.
pub const MIN_SCREEN_LENGTH: f32 = 1e-6;

/// A world-space segment projected into clip space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipSegment {
    pub clip_start: Vec4,
    pub clip_end: Vec4,
    /// Unit screen-space direction from start to end, aspect corrected.
    pub direction: Vec2,
}

impl ClipSegment {
    /// Projects `start` and `end` through `view_proj`.
    pub fn project(view_proj: Mat4, start: Vec3, end: Vec3, resolution: Resolution) -> Self {
        let clip_start = view_proj * start.extend(1.0);
        let clip_end = view_proj * end.extend(1.0);
        Self {
            clip_start,
            clip_end,
            direction: screen_direction(clip_start, clip_end, resolution),
        }
    }

    #[inline]
    pub fn ndc_start(&self) -> Vec2 {
        ndc(self.clip_start)
    }

    #[inline]
    pub fn ndc_end(&self) -> Vec2 {
        ndc(self.clip_end)
    }
}

/// Unit direction from `clip_start` to `clip_end` in pixel space.
///
/// The NDC delta is multiplied by the resolution before normalizing so a
/// perpendicular offset has the same pixel length on both axes. A segment seen
/// end-on has no screen direction; `+X` is returned so no NaN leaves this
/// function.
pub fn screen_direction(clip_start: Vec4, clip_end: Vec4, resolution: Resolution) -> Vec2 {
    let delta = (ndc(clip_end) - ndc(clip_start)) * resolution.as_vec2();
    let len = delta.length();
    if len > MIN_SCREEN_LENGTH { delta / len } else { Vec2::X }
}

/// Perspective divide.
#[inline]
pub fn ndc(clip: Vec4) -> Vec2 {
    clip.xy() / clip.w
}

/// Factor turning a pixel offset into a clip-space `xy` offset at depth `w`.
///
/// The GPU divides by `w` afterwards, which is why the offset has to scale with it.
#[inline]
pub fn pixel_to_ndc_scale(w: f32, resolution: Resolution) -> Vec2 {
    2.0 * w / resolution.as_vec2()
}

/// NDC to pixel coordinates, origin bottom-left.
#[inline]
pub fn ndc_to_pixel(ndc: Vec2, resolution: Resolution) -> Vec2 {
    (ndc * 0.5 + 0.5) * resolution.as_vec2()
}

/// Counter-clockwise perpendicular.
#[inline]
pub fn perpendicular(dir: Vec2) -> Vec2 {
    Vec2::new(-dir.y, dir.x)
}
