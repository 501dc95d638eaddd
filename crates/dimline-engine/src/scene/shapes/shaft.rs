use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::coords::Resolution;
use crate::geometry::joint::{self, shaft_joint_distance};
use crate::geometry::{ClipSegment, ndc_to_pixel, perpendicular, pixel_to_ndc_scale};
use crate::paint::Rgb;
use crate::scene::StageVertex;

/// Shaft draw payload: one half of the shaft, from `anchor` to the screen-space
/// midpoint of the segment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShaftCmd {
    pub view_proj: Mat4,
    /// Coarse transform placing the canonical quad on `anchor -> far`.
    pub model: Mat4,
    pub anchor: Vec3,
    pub far: Vec3,
    pub resolution: Resolution,
    /// Full shaft width in pixels.
    pub width: f32,
    /// Clearance to the arrowhead in pixels.
    pub offset: f32,
    pub arrow_size: Vec2,
    pub color: Rgb,
}

impl ShaftCmd {
    #[inline]
    pub fn segment(&self) -> ClipSegment {
        ClipSegment::project(self.view_proj, self.anchor, self.far, self.resolution)
    }

    /// Vertex stage for the quad corner `local` (`x` in `[-1, 1]`, `y` in `[0, 1]`).
    pub fn vertex(&self, local: Vec2) -> StageVertex {
        let t = 0.5 * local.y;
        let provisional = self.view_proj * self.model * Vec4::new(0.0, t, 0.0, 1.0);
        let seg = self.segment();

        let base = seg.ndc_start().lerp(seg.ndc_end(), t);
        let across = perpendicular(seg.direction) * (local.x * self.width * 0.5);
        let xy = base * provisional.w + across * pixel_to_ndc_scale(provisional.w, self.resolution);

        StageVertex {
            clip: Vec4::new(xy.x, xy.y, provisional.z, provisional.w),
            pixel: ndc_to_pixel(base, self.resolution) + across,
        }
    }

    /// Center of the round cap, in pixels.
    pub fn joint_center(&self) -> Vec2 {
        let seg = self.segment();
        ndc_to_pixel(seg.ndc_start(), self.resolution)
            + seg.direction * shaft_joint_distance(self.arrow_size, self.width, self.offset)
    }

    /// Rasterizes the quad at `pixel` and applies the fragment discard.
    pub fn covers(&self, pixel: Vec2) -> bool {
        if self.width <= 0.0 {
            return false;
        }
        let seg = self.segment();
        let anchor_px = ndc_to_pixel(seg.ndc_start(), self.resolution);
        let mid_px = ndc_to_pixel(seg.ndc_start().lerp(seg.ndc_end(), 0.5), self.resolution);

        let rel = pixel - anchor_px;
        let along = rel.dot(seg.direction);
        let across = rel.dot(perpendicular(seg.direction));
        let half_length = (mid_px - anchor_px).dot(seg.direction);
        if along < 0.0 || along > half_length || across.abs() > self.width * 0.5 {
            return false;
        }

        let center = anchor_px + seg.direction * shaft_joint_distance(self.arrow_size, self.width, self.offset);
        joint::shaft_keeps(pixel - center, seg.direction, self.width)
    }
}
