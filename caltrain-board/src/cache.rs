//! Caching layer for 511 API responses.
//!
//! The board re-fetches the monitoring documents on every refresh tick, but
//! the 511 API rate-limits aggressively and the station metadata changes on
//! the order of timetable updates, not minutes. This wrapper gives each
//! document class its own TTL so a short watch interval stays polite.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::siri::{SiriClient, SiriError, StationsFeed, StopMonitoringFeed, VehicleMonitoringFeed};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the station metadata document.
    pub stations_ttl: Duration,

    /// TTL for the two monitoring documents.
    pub monitoring_ttl: Duration,

    /// Maximum number of cached entries per document class.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stations_ttl: Duration::from_secs(24 * 60 * 60),
            monitoring_ttl: Duration::from_secs(30),
            max_capacity: 4,
        }
    }
}

/// SIRI client with per-document-class response caching.
///
/// Entries are keyed by agency code, so one cached client can in principle
/// serve several boards.
pub struct CachedSiriClient {
    client: SiriClient,
    stations: MokaCache<String, Arc<StationsFeed>>,
    scheduled: MokaCache<String, Arc<StopMonitoringFeed>>,
    vehicles: MokaCache<String, Arc<VehicleMonitoringFeed>>,
}

impl CachedSiriClient {
    /// Create a new cached client.
    pub fn new(client: SiriClient, config: &CacheConfig) -> Self {
        let stations = MokaCache::builder()
            .time_to_live(config.stations_ttl)
            .max_capacity(config.max_capacity)
            .build();
        let scheduled = MokaCache::builder()
            .time_to_live(config.monitoring_ttl)
            .max_capacity(config.max_capacity)
            .build();
        let vehicles = MokaCache::builder()
            .time_to_live(config.monitoring_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            client,
            stations,
            scheduled,
            vehicles,
        }
    }

    /// Fetch the station metadata document, using the cache if fresh.
    pub async fn fetch_stations(&self) -> Result<Arc<StationsFeed>, SiriError> {
        let key = self.client.agency().to_string();

        if let Some(cached) = self.stations.get(&key).await {
            return Ok(cached);
        }

        let feed = Arc::new(self.client.fetch_stations().await?);
        self.stations.insert(key, feed.clone()).await;
        Ok(feed)
    }

    /// Fetch the scheduled-stop document, using the cache if fresh.
    pub async fn fetch_scheduled(&self) -> Result<Arc<StopMonitoringFeed>, SiriError> {
        let key = self.client.agency().to_string();

        if let Some(cached) = self.scheduled.get(&key).await {
            return Ok(cached);
        }

        let feed = Arc::new(self.client.fetch_scheduled().await?);
        self.scheduled.insert(key, feed.clone()).await;
        Ok(feed)
    }

    /// Fetch the live-vehicle document, using the cache if fresh.
    pub async fn fetch_vehicles(&self) -> Result<Arc<VehicleMonitoringFeed>, SiriError> {
        let key = self.client.agency().to_string();

        if let Some(cached) = self.vehicles.get(&key).await {
            return Ok(cached);
        }

        let feed = Arc::new(self.client.fetch_vehicles().await?);
        self.vehicles.insert(key, feed.clone()).await;
        Ok(feed)
    }

    /// Access the underlying client for operations that bypass the cache.
    pub fn client(&self) -> &SiriClient {
        &self.client
    }

    /// Drop all cached entries.
    pub fn invalidate_all(&self) {
        self.stations.invalidate_all();
        self.scheduled.invalidate_all();
        self.vehicles.invalidate_all();
    }
}
