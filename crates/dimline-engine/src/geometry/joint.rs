//! Rounded joint between a shaft and an arrowhead.
//!
//! The arrowhead's base is carved by a circle centered `height * (1 + R)` pixels
//! from its tip, passing through both base corners. The shaft stops `offset`
//! pixels short of that curve and ends in a round cap of the shaft's half width.
//!
//! All distances are in pixels along the anchored screen direction.

use glam::Vec2;

/// Ratio between the joint circle's distance past the arrowhead base and the
/// arrowhead height.
pub const JOINT_RADIUS_RATIO: f32 = 0.5;

/// Radius of the circle carving the arrowhead base: `|size * (0.5, R)|`.
#[inline]
pub fn arrowhead_joint_radius(arrow_size: Vec2) -> f32 {
    (arrow_size * Vec2::new(0.5, JOINT_RADIUS_RATIO)).length()
}

/// Distance from the tip to the arrowhead base on its center line.
#[inline]
pub fn joint_inset(arrow_size: Vec2) -> f32 {
    arrow_size.y * (1.0 + JOINT_RADIUS_RATIO) - arrowhead_joint_radius(arrow_size)
}

/// Distance from the anchor to the arrowhead's joint circle center.
#[inline]
pub fn arrowhead_joint_distance(arrow_size: Vec2) -> f32 {
    arrow_size.y * (1.0 + JOINT_RADIUS_RATIO)
}

/// Distance from the anchor to the center of the shaft's round cap.
#[inline]
pub fn shaft_joint_distance(arrow_size: Vec2, shaft_width: f32, shaft_offset: f32) -> f32 {
    joint_inset(arrow_size) + shaft_offset + shaft_width * 0.5
}

/// Shaft fragment mask. `rel` is the pixel minus the cap center.
///
/// Pixels on the anchor side of the cap center survive only inside the cap.
#[inline]
pub fn shaft_keeps(rel: Vec2, direction: Vec2, shaft_width: f32) -> bool {
    !(rel.dot(direction) < 0.0 && rel.length() > shaft_width * 0.5)
}

/// Arrowhead fragment mask.
///
/// `local` is the quad coordinate (`x` across in `[-1, 1]`, `y` along in
/// `[0, 1]`), `rel` the pixel minus the joint circle center.
#[inline]
pub fn arrowhead_keeps(local: Vec2, rel: Vec2, arrow_size: Vec2) -> bool {
    if local.x.abs() > local.y.abs() {
        return false;
    }
    rel.length() >= arrowhead_joint_radius(arrow_size)
}
