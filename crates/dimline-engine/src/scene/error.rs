use glam::Vec3;

/// Errors raised by [`ArrowEntity`](super::ArrowEntity) construction and updates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArrowError {
    /// The endpoints coincide (or are not finite), so the arrow has no direction.
    #[error("degenerate arrow segment: start {start} and end {end} do not define a direction")]
    InvalidGeometry { start: Vec3, end: Vec3 },

    /// No usable viewport resolution was supplied.
    #[error("arrow needs a positive, finite viewport resolution")]
    NotInitialized,
}
