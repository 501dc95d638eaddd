use glam::Vec2;
use winit::dpi::PhysicalSize;

/// Viewport resolution in physical pixels.
///
/// Shaders use this to turn pixel offsets into NDC offsets, so the value must be
/// the size of the render target the arrow is drawn into.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Resolution {
    pub width: f32,
    pub height: f32,
}

impl Resolution {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true when both dimensions are positive and finite.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Width over height. Returns `1.0` for an invalid resolution.
    #[inline]
    pub fn aspect_ratio(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    /// Merges a partial update: components that are absent, zero or not finite
    /// keep their current value.
    ///
    /// A minimized window reports `0 x 0`; the last usable size is kept so the
    /// next frame still has something sensible to project with.
    #[inline]
    pub fn merged(self, width: Option<f32>, height: Option<f32>) -> Self {
        let pick = |new: Option<f32>, old: f32| match new {
            Some(v) if v > 0.0 && v.is_finite() => v,
            _ => old,
        };
        Self::new(pick(width, self.width), pick(height, self.height))
    }
}

impl From<PhysicalSize<u32>> for Resolution {
    #[inline]
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }
}
