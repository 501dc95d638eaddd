//! Window and event loop.
//!
//! Owns the `winit` event loop and the window, wires it to its GPU surface and
//! tracks the viewport handed to the app every frame.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
