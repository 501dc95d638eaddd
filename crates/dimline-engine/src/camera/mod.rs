//! Camera abstraction consumed by the arrow refresh step.
//!
//! The arrow only needs a view and a projection transform. Hosts with their own
//! camera types implement [`Camera`]; [`LookAtCamera`] covers the common case.
//!
//! Conventions: right-handed, `-Z` forward in view space, depth mapped to
//! `[0, 1]` (wgpu clip space).

use glam::{Mat4, Vec3};

/// Source of the per-draw view and projection transforms.
pub trait Camera {
    /// World to view transform.
    fn view_matrix(&self) -> Mat4;

    /// View to clip transform.
    fn projection_matrix(&self) -> Mat4;

    /// Combined world to clip transform (`projection * view`).
    fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Projection mode of a [`LookAtCamera`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Perspective {
        fov_y_radians: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    },
    /// Symmetric box; the horizontal half extent is `half_height * aspect_ratio`.
    Orthographic {
        half_height: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective { fov_y_radians, aspect_ratio, near, far } => {
                Mat4::perspective_rh(fov_y_radians, aspect_ratio, near, far)
            }
            Projection::Orthographic { half_height, aspect_ratio, near, far } => {
                let half_width = half_height * aspect_ratio;
                Mat4::orthographic_rh(-half_width, half_width, -half_height, half_height, near, far)
            }
        }
    }
}

/// Camera positioned at `eye` looking at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct LookAtCamera {
    eye: Vec3,
    target: Vec3,
    up: Vec3,
    projection: Projection,
}

impl LookAtCamera {
    /// Perspective camera at `(0, 3, 6)` looking at the origin.
    pub fn perspective(fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 3.0, 6.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::Perspective {
                fov_y_radians: fov_y_degrees.to_radians(),
                aspect_ratio,
                near,
                far,
            },
        }
    }

    /// Orthographic camera at `(0, 0, 1)` looking down `-Z`.
    pub fn orthographic(half_height: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::Orthographic { half_height, aspect_ratio, near, far },
        }
    }

    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.eye = eye;
        self.target = target;
        self.up = up;
    }

    /// Builder form of [`look_at`](Self::look_at).
    pub fn looking_at(mut self, eye: Vec3, target: Vec3, up: Vec3) -> Self {
        self.look_at(eye, target, up);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Updates the aspect ratio after a resize.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        match &mut self.projection {
            Projection::Perspective { aspect_ratio, .. }
            | Projection::Orthographic { aspect_ratio, .. } => *aspect_ratio = aspect,
        }
    }
}

impl Camera for LookAtCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }
}
