// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live fleet monitoring: location ingest, track history, and the
//! operations-floor status overview.

use medfleet_domain::{Ambulance, AmbulanceStatus, LocationSample};
use medfleet_persistence::Persistence;
use time::OffsetDateTime;

use crate::error::ApiError;
use crate::request_response::{BookingView, RecordLocationRequest, StatusOverviewResponse};

/// How many track points a history request returns by default.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ApiError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ApiError::InvalidInput {
            field: String::from("latitude"),
            message: format!("{latitude} is outside -90..=90"),
        });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::InvalidInput {
            field: String::from("longitude"),
            message: format!("{longitude} is outside -180..=180"),
        });
    }
    Ok(())
}

/// Records a position report from a vehicle, updating its current position
/// and appending to its track history atomically.
///
/// # Errors
///
/// Returns `validation_error` for out-of-range coordinates and `not_found`
/// for an unknown ambulance.
pub fn record_location(
    persistence: &mut Persistence,
    ambulance_id: i64,
    request: &RecordLocationRequest,
) -> Result<(Ambulance, LocationSample), ApiError> {
    validate_coordinates(request.latitude, request.longitude)?;

    Ok(persistence.record_location(
        ambulance_id,
        request.latitude,
        request.longitude,
        request.speed,
        request.heading,
        request.accuracy,
        OffsetDateTime::now_utc(),
    )?)
}

/// Returns the most recent track points for a vehicle, newest first.
///
/// # Errors
///
/// Returns `not_found` for an unknown ambulance.
pub fn location_history(
    persistence: &mut Persistence,
    ambulance_id: i64,
    limit: Option<i64>,
) -> Result<Vec<LocationSample>, ApiError> {
    let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, 500);
    Ok(persistence.location_history(ambulance_id, limit)?)
}

/// Lists every vehicle that has reported a position at least once.
///
/// # Errors
///
/// Returns an error only if the store cannot be read.
pub fn located_ambulances(persistence: &mut Persistence) -> Result<Vec<Ambulance>, ApiError> {
    Ok(persistence.ambulances_with_position()?)
}

/// Lists the rides currently underway: bookings in `active` status with an
/// ambulance assigned, each with its event history embedded.
///
/// # Errors
///
/// Returns an error only if the store cannot be read.
pub fn active_rides(persistence: &mut Persistence) -> Result<Vec<BookingView>, ApiError> {
    let bookings = persistence.active_rides()?;
    bookings
        .into_iter()
        .map(|booking| {
            let mut events = persistence.booking_events(booking.booking_id)?;
            events.reverse();
            let driver = match booking.assigned_driver_id {
                Some(id) => Some((&persistence.get_driver(id)?).into()),
                None => None,
            };
            let ambulance = match booking.assigned_ambulance_id {
                Some(id) => Some((&persistence.get_ambulance(id)?).into()),
                None => None,
            };
            Ok(BookingView {
                booking,
                events,
                driver,
                ambulance,
            })
        })
        .collect()
}

/// Computes the operations-floor fleet overview.
///
/// A vehicle counts as on duty when it is rostered (`on_duty`) or out on a
/// ride (`in_use`); utilization is the on-duty share of the whole fleet.
///
/// # Errors
///
/// Returns an error only if the store cannot be read.
pub fn status_overview(persistence: &mut Persistence) -> Result<StatusOverviewResponse, ApiError> {
    let ambulances = persistence.list_ambulances(None)?;
    let total = ambulances.len();
    let available = ambulances
        .iter()
        .filter(|a| a.status == AmbulanceStatus::Available)
        .count();
    let on_duty = ambulances
        .iter()
        .filter(|a| matches!(a.status, AmbulanceStatus::OnDuty | AmbulanceStatus::InUse))
        .count();

    let active = persistence.active_rides()?.len();

    #[allow(clippy::cast_precision_loss)]
    let utilization_percent = if total == 0 {
        0.0
    } else {
        on_duty as f64 / total as f64 * 100.0
    };

    Ok(StatusOverviewResponse {
        total_ambulances: total,
        available_ambulances: available,
        on_duty_ambulances: on_duty,
        active_rides: active,
        utilization_percent,
    })
}
