//! The station directory.
//!
//! Built once per run from the station metadata feed; owns every [`Station`]
//! and hands the merge engine mutable access to their train collections.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::{Station, StationId};
use crate::siri::StationsFeed;

/// Raw names already containing this marker belong to a known anomalous
/// duplicate entry in the feed; such stations are excluded entirely.
const ANOMALOUS_NAME_MARKER: &str = "Station";

/// Appended to every kept raw name for display.
const DISPLAY_NAME_SUFFIX: &str = " Station";

/// The fixed set of stations for one run, keyed by normalized id.
///
/// Iteration is in id order. Every station has a non-empty id and display
/// name, and no kept name came from an anomalous feed entry.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    stations: BTreeMap<StationId, Station>,
}

impl StationDirectory {
    /// Build the directory from the station metadata feed.
    ///
    /// Entries whose raw name already contains `"Station"` are skipped (a
    /// known anomalous duplicate), as are entries whose id cannot be
    /// derived. The feed lists each physical station once per platform;
    /// the first occurrence of an id wins.
    pub fn build(feed: &StationsFeed) -> Self {
        let mut stations = BTreeMap::new();

        for entry in feed.entries() {
            if entry.name.contains(ANOMALOUS_NAME_MARKER) {
                debug!(id = %entry.id, name = %entry.name, "skipping anomalous station entry");
                continue;
            }

            let Some(id) = StationId::from_platform_ref(&entry.id) else {
                warn!(id = %entry.id, "skipping station entry with underivable id");
                continue;
            };

            stations
                .entry(id.clone())
                .or_insert_with(|| Station::new(id, format!("{}{}", entry.name, DISPLAY_NAME_SUFFIX)));
        }

        Self { stations }
    }

    /// Look up a station by id.
    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    /// Look up a station by id, mutably.
    pub fn get_mut(&mut self, id: &StationId) -> Option<&mut Station> {
        self.stations.get_mut(id)
    }

    /// Iterate stations in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Empty every station's train collections.
    pub fn clear_trains(&mut self) {
        for station in self.stations.values_mut() {
            station.clear_trains();
        }
    }
}
