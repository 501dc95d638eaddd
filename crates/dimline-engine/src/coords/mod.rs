//! Screen-space size types shared by the scene and the renderers.
//!
//! Pixel space used throughout the crate:
//! - physical framebuffer pixels
//! - origin bottom-left
//! - +X right, +Y up (matches NDC orientation)

mod resolution;

pub use resolution::Resolution;
