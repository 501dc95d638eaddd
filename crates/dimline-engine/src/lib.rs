//! dimline engine crate.
//!
//! Owns the platform + GPU runtime and the dimensioning-arrow primitive:
//! a double-headed arrow anchored to two world-space points whose shaft and
//! heads keep a constant size in pixels.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod camera;
pub mod geometry;
pub mod paint;
pub mod render;
pub mod scene;
