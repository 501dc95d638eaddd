//! Color model shared between the scene and the renderers.
//!
//! Arrows are opaque; colors carry no alpha channel. Values are linear, the
//! sRGB encoding is applied by the surface format.

pub mod color;

pub use color::Rgb;
