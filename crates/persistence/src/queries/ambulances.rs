// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ambulance and location queries.

use diesel::prelude::*;
use tracing::debug;

use medfleet_domain::{Ambulance, AmbulanceStatus, LocationSample};

use crate::data_models::{AmbulanceRow, LocationSampleRow};
use crate::diesel_schema::{ambulance_locations, ambulances};
use crate::error::PersistenceError;

/// Fetches an ambulance by ID.
///
/// # Errors
///
/// Returns `NotFound` if the ambulance does not exist.
pub fn get_ambulance(
    conn: &mut SqliteConnection,
    ambulance_id: i64,
) -> Result<Ambulance, PersistenceError> {
    let row: AmbulanceRow = ambulances::table
        .filter(ambulances::ambulance_id.eq(ambulance_id))
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Ambulance {ambulance_id}"))
            }
            other => other.into(),
        })?;

    Ambulance::try_from(row)
}

/// Lists ambulances, optionally filtered by status, ordered by vehicle
/// number.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be mapped.
pub fn list_ambulances(
    conn: &mut SqliteConnection,
    status: Option<AmbulanceStatus>,
) -> Result<Vec<Ambulance>, PersistenceError> {
    debug!(?status, "Listing ambulances");

    let mut query = ambulances::table.into_boxed();
    if let Some(status) = status {
        query = query.filter(ambulances::status.eq(status.as_str()));
    }

    let rows: Vec<AmbulanceRow> = query.order(ambulances::vehicle_no.asc()).load(conn)?;
    rows.into_iter().map(Ambulance::try_from).collect()
}

/// Lists ambulances that have reported a position at least once.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be mapped.
pub fn ambulances_with_position(
    conn: &mut SqliteConnection,
) -> Result<Vec<Ambulance>, PersistenceError> {
    let rows: Vec<AmbulanceRow> = ambulances::table
        .filter(ambulances::current_latitude.is_not_null())
        .filter(ambulances::current_longitude.is_not_null())
        .order(ambulances::vehicle_no.asc())
        .load(conn)?;

    rows.into_iter().map(Ambulance::try_from).collect()
}

/// Returns the most recent location samples for an ambulance, newest first.
///
/// # Errors
///
/// Returns `NotFound` if the ambulance does not exist.
pub fn location_history(
    conn: &mut SqliteConnection,
    ambulance_id: i64,
    limit: i64,
) -> Result<Vec<LocationSample>, PersistenceError> {
    debug!(ambulance_id, limit, "Loading location history");

    // Distinguish an empty history from an unknown vehicle.
    let _: Ambulance = get_ambulance(conn, ambulance_id)?;

    let rows: Vec<LocationSampleRow> = ambulance_locations::table
        .filter(ambulance_locations::ambulance_id.eq(ambulance_id))
        .order(ambulance_locations::location_id.desc())
        .limit(limit)
        .load(conn)?;

    Ok(rows.into_iter().map(LocationSample::from).collect())
}
