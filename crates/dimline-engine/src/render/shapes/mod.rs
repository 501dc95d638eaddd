//! Arrow part renderers.

mod common;

pub mod arrowhead;
pub mod shaft;

pub use common::ArrowUniform;
