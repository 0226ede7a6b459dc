//! Merge cycle error types.
//!
//! These cover the structural failures that abort a merge cycle. Routine
//! per-record lookup misses in the live pass are not errors and are skipped
//! at the record level instead (see `board::merge`).

use crate::domain::MalformedTimestamp;

/// Errors that abort a merge cycle.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MergeError {
    /// A scheduled stop references a station the directory doesn't know.
    /// Indicates a directory/feed mismatch, not recoverable locally.
    #[error("scheduled stop for train {train} references unknown station {station_ref:?}")]
    UnknownStation { station_ref: String, train: String },

    /// A vehicle record carries neither onward-calls container shape.
    #[error("vehicle {vehicle} has no onward call list in either known shape")]
    MalformedVehicleRecord { vehicle: String },

    /// A departure timestamp failed to parse.
    #[error(transparent)]
    Timestamp(#[from] MalformedTimestamp),
}
