//! GPU device and window surface.
//!
//! One [`Gpu`] per window: adapter and device selection, swapchain
//! configuration, frame acquisition and presentation.

mod error;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
