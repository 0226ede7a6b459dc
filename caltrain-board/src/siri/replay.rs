//! Offline snapshot replay.
//!
//! The counterpart of the client's capture mode: reads the three raw feed
//! documents back from a directory and parses them into a [`FeedSnapshot`],
//! so the board can be run and debugged without network access or an API
//! key.

use std::path::PathBuf;

use serde::de::DeserializeOwned;

use super::error::SiriError;
use super::strip_bom;
use super::types::FeedSnapshot;

/// Capture file name for the station metadata document.
pub const STATIONS_FILE: &str = "stations.json";

/// Capture file name for the scheduled-stop document.
pub const STOP_MONITORING_FILE: &str = "stop_monitoring.json";

/// Capture file name for the live-vehicle document.
pub const VEHICLE_MONITORING_FILE: &str = "vehicle_monitoring.json";

/// Loads feed snapshots from a capture directory.
#[derive(Debug, Clone)]
pub struct ReplayClient {
    dir: PathBuf,
}

impl ReplayClient {
    /// Create a replay client over the given capture directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load and parse all three documents.
    pub fn load(&self) -> Result<FeedSnapshot, SiriError> {
        Ok(FeedSnapshot {
            stations: self.load_document(STATIONS_FILE, "stations")?,
            scheduled: self.load_document(STOP_MONITORING_FILE, "scheduled-stop")?,
            vehicles: self.load_document(VEHICLE_MONITORING_FILE, "live-vehicle")?,
        })
    }

    fn load_document<T: DeserializeOwned>(
        &self,
        file_name: &str,
        document: &'static str,
    ) -> Result<T, SiriError> {
        let path = self.dir.join(file_name);
        let body = std::fs::read_to_string(&path).map_err(|source| SiriError::Io {
            path: path.clone(),
            source,
        })?;

        let body = strip_bom(&body);
        serde_json::from_str(body).map_err(|e| SiriError::Json {
            document,
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}
