//! 511 SIRI response DTOs.
//!
//! These types map directly to the three JSON documents the 511 transit API
//! serves for an agency: the station metadata list, the StopMonitoring
//! (scheduled stop) delivery, and the VehicleMonitoring (live vehicle)
//! delivery. They use `Option` and defaulted lists liberally because the
//! feeds omit sub-structures rather than sending empty ones.

use serde::Deserialize;

/// A parsed set of the three feed documents, handed to one merge cycle.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub stations: StationsFeed,
    pub scheduled: StopMonitoringFeed,
    pub vehicles: VehicleMonitoringFeed,
}

// ---------------------------------------------------------------------------
// Station metadata document
// ---------------------------------------------------------------------------

/// Response from the `/stops` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsFeed {
    #[serde(rename = "Contents")]
    pub contents: StationsContents,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationsContents {
    #[serde(rename = "dataObjects")]
    pub data_objects: StationsDataObjects,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationsDataObjects {
    /// One entry per platform; stations appear once per platform/direction.
    #[serde(rename = "ScheduledStopPoint", default)]
    pub scheduled_stop_points: Vec<StopPointEntry>,
}

/// One raw station/platform entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StopPointEntry {
    /// Raw platform reference (station code + trailing platform character).
    pub id: String,

    /// Raw station name.
    #[serde(rename = "Name")]
    pub name: String,
}

impl StationsFeed {
    /// The raw station entries, empty when the feed omits the list.
    pub fn entries(&self) -> &[StopPointEntry] {
        &self.contents.data_objects.scheduled_stop_points
    }
}

// ---------------------------------------------------------------------------
// Scheduled-stop document (StopMonitoring)
// ---------------------------------------------------------------------------

/// Response from the `/StopMonitoring` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StopMonitoringFeed {
    #[serde(rename = "Siri")]
    pub siri: StopMonitoringSiri,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopMonitoringSiri {
    #[serde(rename = "ServiceDelivery")]
    pub service_delivery: StopServiceDelivery,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopServiceDelivery {
    #[serde(rename = "StopMonitoringDelivery")]
    pub stop_monitoring_delivery: StopMonitoringDelivery,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopMonitoringDelivery {
    #[serde(rename = "MonitoredStopVisit", default)]
    pub monitored_stop_visits: Vec<MonitoredStopVisit>,
}

/// One scheduled stop visit: a train due to call at one platform.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitoredStopVisit {
    #[serde(rename = "MonitoredVehicleJourney")]
    pub journey: StopVisitJourney,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopVisitJourney {
    /// Train/vehicle identifier.
    #[serde(rename = "VehicleRef")]
    pub vehicle_ref: String,

    /// Route/line label.
    #[serde(rename = "LineRef")]
    pub line_ref: String,

    /// Direction code; `"North"` means northbound.
    #[serde(rename = "DirectionRef")]
    pub direction_ref: String,

    /// The call this visit describes. Occasionally omitted by the feed.
    #[serde(rename = "MonitoredCall")]
    pub monitored_call: Option<MonitoredCall>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoredCall {
    /// Raw platform reference.
    #[serde(rename = "StopPointRef")]
    pub stop_point_ref: String,

    /// Scheduled departure timestamp string.
    #[serde(rename = "AimedDepartureTime")]
    pub aimed_departure_time: Option<String>,
}

impl StopMonitoringFeed {
    /// The monitored stop visits, empty when the feed omits the list.
    pub fn visits(&self) -> &[MonitoredStopVisit] {
        &self
            .siri
            .service_delivery
            .stop_monitoring_delivery
            .monitored_stop_visits
    }
}

// ---------------------------------------------------------------------------
// Live-vehicle document (VehicleMonitoring)
// ---------------------------------------------------------------------------

/// Response from the `/VehicleMonitoring` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleMonitoringFeed {
    #[serde(rename = "Siri")]
    pub siri: VehicleMonitoringSiri,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleMonitoringSiri {
    #[serde(rename = "ServiceDelivery")]
    pub service_delivery: VehicleServiceDelivery,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleServiceDelivery {
    #[serde(rename = "VehicleMonitoringDelivery")]
    pub vehicle_monitoring_delivery: VehicleMonitoringDelivery,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleMonitoringDelivery {
    #[serde(rename = "VehicleActivity", default)]
    pub vehicle_activities: Vec<VehicleActivity>,
}

/// One in-service vehicle with its upcoming stops.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleActivity {
    #[serde(rename = "MonitoredVehicleJourney")]
    pub journey: VehicleJourney,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleJourney {
    /// Train/vehicle identifier.
    #[serde(rename = "VehicleRef")]
    pub vehicle_ref: String,

    /// Direction code; any code *containing* `"North"` means northbound
    /// (this feed has decorated the code in past revisions).
    #[serde(rename = "DirectionRef")]
    pub direction_ref: String,

    /// Onward calls, wrapper shape: `"OnwardCalls": {"OnwardCall": [...]}`.
    #[serde(rename = "OnwardCalls")]
    pub onward_calls: Option<OnwardCallList>,

    /// Onward calls, bare shape: `"OnwardCall": [...]`. Older feed
    /// revisions used this key directly on the journey.
    #[serde(rename = "OnwardCall")]
    pub onward_call: Option<Vec<OnwardCall>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OnwardCallList {
    #[serde(rename = "OnwardCall", default)]
    pub onward_call: Vec<OnwardCall>,
}

/// One upcoming stop for a specific in-service vehicle.
#[derive(Debug, Clone, Deserialize)]
pub struct OnwardCall {
    /// Raw platform reference.
    #[serde(rename = "StopPointRef")]
    pub stop_point_ref: String,

    /// Live-estimated departure timestamp string; omitted when the feed has
    /// no estimate for this call yet.
    #[serde(rename = "ExpectedDepartureTime")]
    pub expected_departure_time: Option<String>,
}

impl VehicleJourney {
    /// The onward calls, whichever of the two container shapes is present.
    /// `None` when the record carries neither.
    pub fn onward_call_list(&self) -> Option<&[OnwardCall]> {
        match (&self.onward_calls, &self.onward_call) {
            (Some(wrapper), _) => Some(&wrapper.onward_call),
            (None, Some(calls)) => Some(calls),
            (None, None) => None,
        }
    }
}

impl VehicleMonitoringFeed {
    /// The vehicle activities, empty when the feed omits the list.
    pub fn activities(&self) -> &[VehicleActivity] {
        &self
            .siri
            .service_delivery
            .vehicle_monitoring_delivery
            .vehicle_activities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_stations_feed() {
        let json = r#"{
            "Contents": {
                "dataObjects": {
                    "ScheduledStopPoint": [
                        {"id": "70011", "Name": "San Francisco"},
                        {"id": "70012", "Name": "San Francisco"},
                        {"id": "70211", "Name": "Mountain View"}
                    ]
                }
            }
        }"#;

        let feed: StationsFeed = serde_json::from_str(json).unwrap();
        let entries = feed.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, "70011");
        assert_eq!(entries[0].name, "San Francisco");
        assert_eq!(entries[2].name, "Mountain View");
    }

    #[test]
    fn stations_feed_without_list_is_empty() {
        let json = r#"{"Contents": {"dataObjects": {}}}"#;
        let feed: StationsFeed = serde_json::from_str(json).unwrap();
        assert!(feed.entries().is_empty());
    }

    #[test]
    fn deserialize_stop_monitoring_feed() {
        let json = r#"{
            "Siri": {
                "ServiceDelivery": {
                    "ResponseTimestamp": "2024-03-01T07:45:00Z",
                    "StopMonitoringDelivery": {
                        "MonitoredStopVisit": [
                            {
                                "MonitoredVehicleJourney": {
                                    "LineRef": "Local",
                                    "DirectionRef": "North",
                                    "VehicleRef": "101",
                                    "MonitoredCall": {
                                        "StopPointRef": "70211",
                                        "AimedDepartureTime": "2024-03-01T08:00:00Z"
                                    }
                                }
                            }
                        ]
                    }
                }
            }
        }"#;

        let feed: StopMonitoringFeed = serde_json::from_str(json).unwrap();
        let visits = feed.visits();
        assert_eq!(visits.len(), 1);

        let journey = &visits[0].journey;
        assert_eq!(journey.vehicle_ref, "101");
        assert_eq!(journey.line_ref, "Local");
        assert_eq!(journey.direction_ref, "North");

        let call = journey.monitored_call.as_ref().unwrap();
        assert_eq!(call.stop_point_ref, "70211");
        assert_eq!(
            call.aimed_departure_time.as_deref(),
            Some("2024-03-01T08:00:00Z")
        );
    }

    #[test]
    fn stop_visit_without_call_is_tolerated() {
        let json = r#"{
            "Siri": {
                "ServiceDelivery": {
                    "StopMonitoringDelivery": {
                        "MonitoredStopVisit": [
                            {
                                "MonitoredVehicleJourney": {
                                    "LineRef": "Local",
                                    "DirectionRef": "South",
                                    "VehicleRef": "102"
                                }
                            }
                        ]
                    }
                }
            }
        }"#;

        let feed: StopMonitoringFeed = serde_json::from_str(json).unwrap();
        assert!(feed.visits()[0].journey.monitored_call.is_none());
    }

    #[test]
    fn deserialize_vehicle_feed_wrapper_shape() {
        let json = r#"{
            "Siri": {
                "ServiceDelivery": {
                    "VehicleMonitoringDelivery": {
                        "VehicleActivity": [
                            {
                                "MonitoredVehicleJourney": {
                                    "VehicleRef": "101",
                                    "DirectionRef": "North",
                                    "OnwardCalls": {
                                        "OnwardCall": [
                                            {
                                                "StopPointRef": "70211",
                                                "ExpectedDepartureTime": "2024-03-01T08:03:00Z"
                                            }
                                        ]
                                    }
                                }
                            }
                        ]
                    }
                }
            }
        }"#;

        let feed: VehicleMonitoringFeed = serde_json::from_str(json).unwrap();
        let journey = &feed.activities()[0].journey;
        let calls = journey.onward_call_list().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].stop_point_ref, "70211");
        assert_eq!(
            calls[0].expected_departure_time.as_deref(),
            Some("2024-03-01T08:03:00Z")
        );
    }

    #[test]
    fn deserialize_vehicle_feed_bare_shape() {
        let json = r#"{
            "Siri": {
                "ServiceDelivery": {
                    "VehicleMonitoringDelivery": {
                        "VehicleActivity": [
                            {
                                "MonitoredVehicleJourney": {
                                    "VehicleRef": "305",
                                    "DirectionRef": "Northbound",
                                    "OnwardCall": [
                                        {"StopPointRef": "70021"},
                                        {
                                            "StopPointRef": "70031",
                                            "ExpectedDepartureTime": "2024-03-01T09:10:00Z"
                                        }
                                    ]
                                }
                            }
                        ]
                    }
                }
            }
        }"#;

        let feed: VehicleMonitoringFeed = serde_json::from_str(json).unwrap();
        let journey = &feed.activities()[0].journey;
        let calls = journey.onward_call_list().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].expected_departure_time.is_none());
        assert_eq!(calls[1].stop_point_ref, "70031");
    }

    #[test]
    fn journey_with_neither_shape_has_no_calls() {
        let json = r#"{
            "MonitoredVehicleJourney": {
                "VehicleRef": "404",
                "DirectionRef": "South"
            }
        }"#;

        let activity: VehicleActivity = serde_json::from_str(json).unwrap();
        assert!(activity.journey.onward_call_list().is_none());
    }

    #[test]
    fn wrapper_shape_wins_when_both_present() {
        let json = r#"{
            "MonitoredVehicleJourney": {
                "VehicleRef": "9",
                "DirectionRef": "North",
                "OnwardCalls": {"OnwardCall": [{"StopPointRef": "70011"}]},
                "OnwardCall": [{"StopPointRef": "70021"}, {"StopPointRef": "70031"}]
            }
        }"#;

        let activity: VehicleActivity = serde_json::from_str(json).unwrap();
        let calls = activity.journey.onward_call_list().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].stop_point_ref, "70011");
    }

    #[test]
    fn empty_deliveries_are_tolerated() {
        let stops: StopMonitoringFeed = serde_json::from_str(
            r#"{"Siri": {"ServiceDelivery": {"StopMonitoringDelivery": {}}}}"#,
        )
        .unwrap();
        assert!(stops.visits().is_empty());

        let vehicles: VehicleMonitoringFeed = serde_json::from_str(
            r#"{"Siri": {"ServiceDelivery": {"VehicleMonitoringDelivery": {}}}}"#,
        )
        .unwrap();
        assert!(vehicles.activities().is_empty());
    }
}
