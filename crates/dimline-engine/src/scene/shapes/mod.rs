pub mod arrowhead;
pub mod shaft;
