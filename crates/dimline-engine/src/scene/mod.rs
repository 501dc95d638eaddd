//! Scene-side arrow model and draw stream.
//!
//! Responsibilities:
//! - own arrow endpoints, parameters and per-renderable shader parameters
//! - turn the current state into immutable draw commands each frame
//! - keep shape-specific command types isolated under `scene::shapes`

mod arrow;
mod cmd;
mod error;
mod list;
mod material;
mod node;
mod params;

pub mod shapes;

pub use arrow::{ArrowEntity, ArrowPart, Renderable};
pub use cmd::{DrawCmd, StageVertex};
pub use error::ArrowError;
pub use list::{DrawItem, DrawList};
pub use material::{ArrowheadMaterial, Material, MaterialUpdate, ShaftMaterial};
pub use node::{FrameView, SceneNode};
pub use params::{ArrowParameters, ArrowParametersPatch};
