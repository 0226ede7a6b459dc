//! 511 SIRI feed sources.
//!
//! This module owns everything that produces parsed feed documents: the
//! HTTP client for the 511 transit API, the capture/replay file format for
//! offline runs, and the serde DTOs for the three documents. Schema
//! validation happens at deserialization; downstream code works with typed
//! records, never raw JSON.

mod client;
mod error;
mod replay;
mod types;

pub use client::{SiriClient, SiriConfig};
pub use error::SiriError;
pub use replay::{
    ReplayClient, STATIONS_FILE, STOP_MONITORING_FILE, VEHICLE_MONITORING_FILE,
};
pub use types::{
    FeedSnapshot, MonitoredCall, MonitoredStopVisit, OnwardCall, OnwardCallList, StationsFeed,
    StopMonitoringFeed, StopPointEntry, StopVisitJourney, VehicleActivity, VehicleJourney,
    VehicleMonitoringFeed,
};

/// Strip the UTF-8 byte-order mark the 511 API prepends to JSON bodies.
pub(crate) fn strip_bom(body: &str) -> &str {
    body.strip_prefix('\u{feff}').unwrap_or(body)
}
