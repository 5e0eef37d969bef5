//! Error types for the `hive-world` crate.
//!
//! Only world construction and bookkeeping fail with [`WorldError`]. In-world
//! action failures are reported as result codes, never as errors.

use hive_types::{RegionId, TargetId, WorkerName};

/// Errors that can occur while building or editing a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A region was not found.
    #[error("region not found: {0}")]
    RegionNotFound(RegionId),

    /// A position lies outside its region's grid.
    #[error("position ({x}, {y}) is outside region {region}")]
    OutOfBounds {
        /// The region.
        region: RegionId,
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },

    /// A target with the same identifier already exists.
    #[error("duplicate target id: {0}")]
    DuplicateTarget(TargetId),

    /// A worker with the same name already exists.
    #[error("duplicate worker name: {0}")]
    DuplicateWorker(WorkerName),

    /// The requested layout cannot be generated.
    #[error("invalid layout: {reason}")]
    InvalidLayout {
        /// Why the layout was rejected.
        reason: String,
    },
}
