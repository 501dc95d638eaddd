//! Contracts between the runtime (platform loop) and applications.
//!
//! Applications implement [`App`] and receive a [`FrameCtx`] once per frame;
//! runtime internals never leak past it.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
