//! The train merge engine.
//!
//! Reconciles the two monitoring documents against the station directory.
//! A merge cycle runs three passes in strict order:
//!
//! 1. [`clear`] — drop every train left over from the previous cycle.
//! 2. [`apply_scheduled`] — populate trains from the scheduled-stop feed,
//!    aimed departure only.
//! 3. [`apply_live`] — attach expected departures from the live-vehicle
//!    feed onto the trains the scheduled pass created.
//!
//! The live pass depends on lookups created by the scheduled pass, so the
//! ordering is significant; [`reconcile`] runs the whole sequence and is
//! what callers should use. Structural feed problems abort the cycle;
//! live updates that merely fail to cross-reference a scheduled train are
//! routine in this data and are skipped one record at a time.

use tracing::{debug, warn};

use crate::domain::{Direction, StationId, Train, parse_feed_timestamp};
use crate::siri::{StopMonitoringFeed, VehicleMonitoringFeed};

use super::directory::StationDirectory;
use super::error::MergeError;

/// Direction code marking a northbound train.
const NORTHBOUND_CODE: &str = "North";

/// Empty every station's train collections.
pub fn clear(directory: &mut StationDirectory) {
    directory.clear_trains();
}

/// Populate the directory's trains from the scheduled-stop feed.
///
/// Every visit yields a [`Train`] with its aimed departure and no expected
/// time yet, inserted at (station, direction) keyed by train id with
/// last-write-wins semantics. A visit referencing a station the directory
/// doesn't know fails the cycle with [`MergeError::UnknownStation`]: the
/// directory is assumed exhaustive, so a miss here is a directory/feed
/// mismatch the caller should surface.
pub fn apply_scheduled(
    directory: &mut StationDirectory,
    feed: &StopMonitoringFeed,
) -> Result<(), MergeError> {
    for visit in feed.visits() {
        let journey = &visit.journey;

        let Some(call) = &journey.monitored_call else {
            warn!(train = %journey.vehicle_ref, "stop visit without a monitored call, skipping");
            continue;
        };
        let Some(aimed_raw) = &call.aimed_departure_time else {
            warn!(
                train = %journey.vehicle_ref,
                stop = %call.stop_point_ref,
                "stop visit without an aimed departure, skipping"
            );
            continue;
        };

        let aimed = parse_feed_timestamp(aimed_raw)?;
        let direction = scheduled_direction(&journey.direction_ref);

        let station = StationId::from_platform_ref(&call.stop_point_ref)
            .and_then(|id| directory.get_mut(&id))
            .ok_or_else(|| MergeError::UnknownStation {
                station_ref: call.stop_point_ref.clone(),
                train: journey.vehicle_ref.clone(),
            })?;

        station.upsert_train(
            direction,
            Train::scheduled(journey.vehicle_ref.clone(), journey.line_ref.clone(), aimed),
        );
    }

    Ok(())
}

/// Attach expected departures from the live-vehicle feed.
///
/// Each vehicle's onward calls are looked up by (station, direction, train
/// id); a hit gets its `expected_departure` set in place. Misses — unknown
/// station, underivable ref, or a train the scheduled pass never created —
/// are routine in this data and skip just that call. A vehicle record with
/// neither onward-calls shape fails the cycle with
/// [`MergeError::MalformedVehicleRecord`].
pub fn apply_live(
    directory: &mut StationDirectory,
    feed: &VehicleMonitoringFeed,
) -> Result<(), MergeError> {
    for activity in feed.activities() {
        let journey = &activity.journey;

        let calls = journey
            .onward_call_list()
            .ok_or_else(|| MergeError::MalformedVehicleRecord {
                vehicle: journey.vehicle_ref.clone(),
            })?;

        let direction = live_direction(&journey.direction_ref);

        for call in calls {
            let Some(expected_raw) = &call.expected_departure_time else {
                continue;
            };
            let expected = parse_feed_timestamp(expected_raw)?;

            let train = StationId::from_platform_ref(&call.stop_point_ref)
                .and_then(|id| directory.get_mut(&id))
                .and_then(|station| station.train_mut(direction, &journey.vehicle_ref));

            let Some(train) = train else {
                debug!(
                    train = %journey.vehicle_ref,
                    stop = %call.stop_point_ref,
                    "live update without a scheduled entry, skipping"
                );
                continue;
            };

            train.expected_departure = Some(expected);
        }
    }

    Ok(())
}

/// Run one full merge cycle: `clear → apply_scheduled → apply_live`.
///
/// The sequence must be treated as one atomic critical section per
/// directory; holding `&mut` across it guarantees that here. On error the
/// directory is left partially populated — callers should discard the
/// cycle's output and try again, which starts from `clear` anyway.
pub fn reconcile(
    directory: &mut StationDirectory,
    scheduled: &StopMonitoringFeed,
    vehicles: &VehicleMonitoringFeed,
) -> Result<(), MergeError> {
    clear(directory);
    apply_scheduled(directory, scheduled)?;
    apply_live(directory, vehicles)
}

/// The scheduled feed marks northbound with the exact code.
fn scheduled_direction(code: &str) -> Direction {
    if code == NORTHBOUND_CODE {
        Direction::Northbound
    } else {
        Direction::Southbound
    }
}

/// The live feed has decorated its direction code across revisions, so
/// northbound is a containment match.
fn live_direction(code: &str) -> Direction {
    if code.contains(NORTHBOUND_CODE) {
        Direction::Northbound
    } else {
        Direction::Southbound
    }
}
