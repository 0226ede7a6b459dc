//! Core station/train model.
//!
//! These types hold the reconciled view the board renders: stations with
//! their two per-direction train collections, and the feed-time helpers.
//! Identifiers are normalized at construction (a `StationId` is always
//! non-empty), so code receiving these types can trust them.

mod station;
mod time;
mod train;

pub use station::{Direction, Station, StationId};
pub use time::{MalformedTimestamp, parse_feed_timestamp, to_local};
pub use train::Train;
