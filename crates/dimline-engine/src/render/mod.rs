//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipeline, buffers, bind groups).
//!
//! Convention:
//! - every draw command carries its own projection inputs; nothing here
//!   depends on a global camera
//! - pixel sizes are physical framebuffer pixels, origin bottom-left

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
