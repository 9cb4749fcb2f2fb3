// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ambulance and location-sample mutations.

use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

use medfleet_domain::{Ambulance, LocationSample};

use crate::data_models::{
    AmbulanceChanges, AmbulanceRow, LocationSampleRow, NewAmbulance, NewLocationSample,
};
use crate::diesel_schema::{ambulance_locations, ambulances};
use crate::error::PersistenceError;
use crate::iso;

/// Creates a new ambulance.
///
/// # Errors
///
/// Returns `Conflict` if the vehicle number is already registered.
pub fn create_ambulance(
    conn: &mut SqliteConnection,
    new: &NewAmbulance,
) -> Result<Ambulance, PersistenceError> {
    info!(vehicle_no = %new.vehicle_no, "Creating ambulance");

    let row: AmbulanceRow = diesel::insert_into(ambulances::table)
        .values(new)
        .get_result(conn)?;

    Ambulance::try_from(row)
}

/// Applies a partial update to an ambulance.
///
/// # Errors
///
/// Returns `NotFound` if the ambulance does not exist and `Conflict` if a
/// vehicle-number change collides with another vehicle.
pub fn update_ambulance(
    conn: &mut SqliteConnection,
    ambulance_id: i64,
    changes: &AmbulanceChanges,
) -> Result<Ambulance, PersistenceError> {
    info!(ambulance_id, "Updating ambulance");

    let row: AmbulanceRow =
        diesel::update(ambulances::table.filter(ambulances::ambulance_id.eq(ambulance_id)))
            .set(changes)
            .get_result(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    PersistenceError::NotFound(format!("Ambulance {ambulance_id}"))
                }
                other => other.into(),
            })?;

    Ambulance::try_from(row)
}

/// Hard-deletes an ambulance.
///
/// # Errors
///
/// Returns `NotFound` if the ambulance does not exist.
pub fn delete_ambulance(
    conn: &mut SqliteConnection,
    ambulance_id: i64,
) -> Result<(), PersistenceError> {
    info!(ambulance_id, "Deleting ambulance");

    let deleted: usize =
        diesel::delete(ambulances::table.filter(ambulances::ambulance_id.eq(ambulance_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Ambulance {ambulance_id}"
        )));
    }
    Ok(())
}

/// Records a location sample for an ambulance.
///
/// Updates the vehicle's current position and appends an immutable point to
/// the location time series, atomically.
///
/// # Errors
///
/// Returns `NotFound` if the ambulance does not exist.
pub fn record_location(
    conn: &mut SqliteConnection,
    ambulance_id: i64,
    latitude: f64,
    longitude: f64,
    speed: Option<f64>,
    heading: Option<f64>,
    accuracy: Option<f64>,
    now: OffsetDateTime,
) -> Result<(Ambulance, LocationSample), PersistenceError> {
    debug!(ambulance_id, latitude, longitude, "Recording location sample");

    let recorded_at: String = iso(now)?;

    conn.transaction(|conn| {
        let row: AmbulanceRow =
            diesel::update(ambulances::table.filter(ambulances::ambulance_id.eq(ambulance_id)))
                .set((
                    ambulances::current_latitude.eq(Some(latitude)),
                    ambulances::current_longitude.eq(Some(longitude)),
                    ambulances::last_location_update.eq(Some(recorded_at.clone())),
                ))
                .get_result(conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => {
                        PersistenceError::NotFound(format!("Ambulance {ambulance_id}"))
                    }
                    other => other.into(),
                })?;

        let sample: LocationSampleRow = diesel::insert_into(ambulance_locations::table)
            .values(&NewLocationSample {
                ambulance_id,
                latitude,
                longitude,
                speed,
                heading,
                accuracy,
                recorded_at,
            })
            .get_result(conn)?;

        Ok((Ambulance::try_from(row)?, LocationSample::from(sample)))
    })
}
