//! Coarse world-space placement of the canonical quads.
//!
//! The shaders redo the exact pixel placement every frame from the endpoint
//! uniforms; this transform only supplies depth and `w` for each vertex and is
//! recomputed when the endpoints move.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Quat, Vec3};

/// Axis the canonical quads extend along.
pub const CANONICAL_AXIS: Vec3 = Vec3::Y;

/// Segments shorter than this have no usable direction.
pub const MIN_SEGMENT_LENGTH: f32 = 1e-6;

/// Unit direction and length from `from` to `to`.
///
/// Returns `None` for a degenerate or non-finite segment.
pub fn segment_direction(from: Vec3, to: Vec3) -> Option<(Vec3, f32)> {
    let delta = to - from;
    let length = delta.length();
    if !length.is_finite() || length < MIN_SEGMENT_LENGTH {
        return None;
    }
    Some((delta / length, length))
}

/// Rotation taking [`CANONICAL_AXIS`] onto `direction` (unit length).
///
/// Axis `Y x dir`, angle `acos(Y . dir)`. When the two are antiparallel the
/// cross product vanishes and a half turn about `Z` is used instead.
pub fn rotation_onto(direction: Vec3) -> Quat {
    let angle = CANONICAL_AXIS.dot(direction).clamp(-1.0, 1.0).acos();
    match CANONICAL_AXIS.cross(direction).try_normalize() {
        Some(axis) => Quat::from_axis_angle(axis, angle),
        None if angle > FRAC_PI_2 => Quat::from_rotation_z(PI),
        None => Quat::IDENTITY,
    }
}

/// Scale `(1, length, 1)`, rotate onto `direction`, translate to `anchor`.
pub fn anchored_transform(anchor: Vec3, direction: Vec3, length: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, length, 1.0),
        rotation_onto(direction),
        anchor,
    )
}
