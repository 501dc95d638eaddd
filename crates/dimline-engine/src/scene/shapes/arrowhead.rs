use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::coords::Resolution;
use crate::geometry::joint::{self, arrowhead_joint_distance};
use crate::geometry::{ClipSegment, ndc_to_pixel, perpendicular, pixel_to_ndc_scale};
use crate::paint::Rgb;
use crate::scene::StageVertex;

/// Arrowhead draw payload. The tip sits on `anchor` and the head opens toward `far`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArrowheadCmd {
    pub view_proj: Mat4,
    pub model: Mat4,
    pub anchor: Vec3,
    pub far: Vec3,
    pub resolution: Resolution,
    /// `(width, height)` in pixels.
    pub size: Vec2,
    pub color: Rgb,
}

impl ArrowheadCmd {
    #[inline]
    pub fn segment(&self) -> ClipSegment {
        ClipSegment::project(self.view_proj, self.anchor, self.far, self.resolution)
    }

    /// Pixel offset of the quad corner `local` from the tip.
    #[inline]
    fn pixel_offset(&self, direction: Vec2, local: Vec2) -> Vec2 {
        direction * (local.y * self.size.y) + perpendicular(direction) * (local.x * self.size.x * 0.5)
    }

    /// Vertex stage for the quad corner `local` (`x` in `[-1, 1]`, `y` in `[0, 1]`).
    pub fn vertex(&self, local: Vec2) -> StageVertex {
        let provisional = self.view_proj * self.model * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let seg = self.segment();

        let base = seg.ndc_start();
        let offset = self.pixel_offset(seg.direction, local);
        let xy = base * provisional.w + offset * pixel_to_ndc_scale(provisional.w, self.resolution);

        StageVertex {
            clip: Vec4::new(xy.x, xy.y, provisional.z, provisional.w),
            pixel: ndc_to_pixel(base, self.resolution) + offset,
        }
    }

    /// Center of the circle carving the base, in pixels.
    pub fn joint_center(&self) -> Vec2 {
        let seg = self.segment();
        ndc_to_pixel(seg.ndc_start(), self.resolution) + seg.direction * arrowhead_joint_distance(self.size)
    }

    /// Rasterizes the quad at `pixel` and applies both discard tests.
    pub fn covers(&self, pixel: Vec2) -> bool {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return false;
        }
        let seg = self.segment();
        let tip = ndc_to_pixel(seg.ndc_start(), self.resolution);

        let rel = pixel - tip;
        let local = Vec2::new(
            rel.dot(perpendicular(seg.direction)) / (self.size.x * 0.5),
            rel.dot(seg.direction) / self.size.y,
        );
        if local.y < 0.0 || local.y > 1.0 || local.x.abs() > 1.0 {
            return false;
        }

        let center = tip + seg.direction * arrowhead_joint_distance(self.size);
        joint::arrowhead_keeps(local, pixel - center, self.size)
    }
}
