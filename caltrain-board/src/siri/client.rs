//! 511 transit API HTTP client.
//!
//! Fetches the three documents the board needs for one agency: station
//! metadata (`/stops`), the scheduled-stop delivery (`/StopMonitoring`),
//! and the live-vehicle delivery (`/VehicleMonitoring`). Authentication is
//! an API key passed as a query parameter.

use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::error::SiriError;
use super::replay::{STATIONS_FILE, STOP_MONITORING_FILE, VEHICLE_MONITORING_FILE};
use super::strip_bom;
use super::types::{FeedSnapshot, StationsFeed, StopMonitoringFeed, VehicleMonitoringFeed};

/// Default base URL for the 511 transit API.
const DEFAULT_BASE_URL: &str = "https://api.511.org/transit";

/// Default agency code (Caltrain).
const DEFAULT_AGENCY: &str = "CT";

/// Configuration for the SIRI client.
#[derive(Debug, Clone)]
pub struct SiriConfig {
    /// API key passed as the `api_key` query parameter
    pub api_key: String,
    /// Operator/agency code to query
    pub agency: String,
    /// Base URL for the API (defaults to production 511)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// When set, raw response bodies are written here after each fetch
    pub capture_dir: Option<PathBuf>,
}

impl SiriConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            agency: DEFAULT_AGENCY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            capture_dir: None,
        }
    }

    /// Set the agency code.
    pub fn with_agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = agency.into();
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Capture raw response bodies into the given directory.
    pub fn with_capture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.capture_dir = Some(dir.into());
        self
    }
}

/// 511 transit API client.
#[derive(Debug, Clone)]
pub struct SiriClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    agency: String,
    capture_dir: Option<PathBuf>,
}

impl SiriClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SiriConfig) -> Result<Self, SiriError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            agency: config.agency,
            capture_dir: config.capture_dir,
        })
    }

    /// The agency code this client queries.
    pub fn agency(&self) -> &str {
        &self.agency
    }

    /// Fetch the station metadata document.
    pub async fn fetch_stations(&self) -> Result<StationsFeed, SiriError> {
        let body = self
            .get_body("stops", ("operator_id", self.agency.as_str()), STATIONS_FILE)
            .await?;
        parse_document("stations", &body)
    }

    /// Fetch the scheduled-stop (StopMonitoring) document.
    pub async fn fetch_scheduled(&self) -> Result<StopMonitoringFeed, SiriError> {
        let body = self
            .get_body(
                "StopMonitoring",
                ("agency", self.agency.as_str()),
                STOP_MONITORING_FILE,
            )
            .await?;
        parse_document("scheduled-stop", &body)
    }

    /// Fetch the live-vehicle (VehicleMonitoring) document.
    pub async fn fetch_vehicles(&self) -> Result<VehicleMonitoringFeed, SiriError> {
        let body = self
            .get_body(
                "VehicleMonitoring",
                ("agency", self.agency.as_str()),
                VEHICLE_MONITORING_FILE,
            )
            .await?;
        parse_document("live-vehicle", &body)
    }

    /// Fetch all three documents concurrently.
    pub async fn fetch_snapshot(&self) -> Result<FeedSnapshot, SiriError> {
        let (stations, scheduled, vehicles) = futures::try_join!(
            self.fetch_stations(),
            self.fetch_scheduled(),
            self.fetch_vehicles()
        )?;

        Ok(FeedSnapshot {
            stations,
            scheduled,
            vehicles,
        })
    }

    /// GET one document body, mapping error statuses and capturing the raw
    /// body when configured.
    async fn get_body(
        &self,
        path: &str,
        agency_param: (&str, &str),
        capture_name: &str,
    ) -> Result<String, SiriError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), agency_param])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SiriError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SiriError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SiriError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        if let Some(dir) = &self.capture_dir {
            let path = dir.join(capture_name);
            std::fs::write(&path, &body).map_err(|source| SiriError::Io { path, source })?;
        }

        Ok(body)
    }
}

/// Parse one document body, stripping the UTF-8 BOM the 511 API prepends.
fn parse_document<T: DeserializeOwned>(
    document: &'static str,
    body: &str,
) -> Result<T, SiriError> {
    let body = strip_bom(body);
    serde_json::from_str(body).map_err(|e| SiriError::Json {
        document,
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = SiriConfig::new("test-key");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.agency, DEFAULT_AGENCY);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.capture_dir.is_none());
    }

    #[test]
    fn config_builder() {
        let config = SiriConfig::new("test-key")
            .with_agency("SF")
            .with_base_url("http://localhost:8080")
            .with_timeout(60)
            .with_capture_dir("/tmp/snapshots");

        assert_eq!(config.agency, "SF");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(
            config.capture_dir.as_deref(),
            Some(std::path::Path::new("/tmp/snapshots"))
        );
    }

    #[test]
    fn client_creation() {
        let client = SiriClient::new(SiriConfig::new("test-key"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().agency(), "CT");
    }

    #[test]
    fn parse_document_strips_bom() {
        let body = "\u{feff}{\"Contents\": {\"dataObjects\": {}}}";
        let feed: StationsFeed = parse_document("stations", body).unwrap();
        assert!(feed.entries().is_empty());
    }

    #[test]
    fn parse_document_reports_the_document_name() {
        let err = parse_document::<StationsFeed>("stations", "<html>oops</html>").unwrap_err();
        match err {
            SiriError::Json { document, body, .. } => {
                assert_eq!(document, "stations");
                assert_eq!(body.as_deref(), Some("<html>oops</html>"));
            }
            other => panic!("expected Json error, got {other:?}"),
        }
    }
}
