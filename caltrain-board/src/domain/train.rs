//! The per-station train record.

use chrono::{DateTime, Utc};

/// An upcoming train at one station, in one direction.
///
/// A record is created from the scheduled-stop feed with the aimed departure
/// only; the live-vehicle feed may later attach an expected departure. The
/// same train id legitimately appears at many stations (a train visits many
/// stops) — uniqueness is scoped to (station, direction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    /// Train/vehicle identifier, unique within one direction at one station.
    pub id: String,

    /// Route/line label (e.g. "Local", "Limited"). Informational only.
    pub line: String,

    /// Scheduled departure from this station.
    pub aimed_departure: DateTime<Utc>,

    /// Live-estimated departure, when an estimate exists.
    pub expected_departure: Option<DateTime<Utc>>,
}

impl Train {
    /// Create a train with no live estimate yet.
    pub fn scheduled(
        id: impl Into<String>,
        line: impl Into<String>,
        aimed_departure: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            line: line.into(),
            aimed_departure,
            expected_departure: None,
        }
    }

    /// Whole minutes of lateness, clamped at zero.
    ///
    /// `None` when no live estimate is available. A train running ahead of
    /// schedule reports zero — the board never shows "early".
    pub fn minutes_late(&self) -> Option<i64> {
        self.expected_departure
            .map(|expected| (expected - self.aimed_departure).num_minutes().max(0))
    }
}
