// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Driver mutations.

use diesel::prelude::*;
use tracing::info;

use medfleet_domain::Driver;

use crate::data_models::{DriverChanges, DriverRow, NewDriver};
use crate::diesel_schema::drivers;
use crate::error::PersistenceError;

/// Creates a new driver.
///
/// # Errors
///
/// Returns `Conflict` if the phone number is already registered.
pub fn create_driver(
    conn: &mut SqliteConnection,
    new: &NewDriver,
) -> Result<Driver, PersistenceError> {
    info!(phone = %new.phone, "Creating driver");

    let row: DriverRow = diesel::insert_into(drivers::table)
        .values(new)
        .get_result(conn)?;

    Driver::try_from(row)
}

/// Applies a partial update to a driver.
///
/// # Errors
///
/// Returns `NotFound` if the driver does not exist and `Conflict` if a phone
/// change collides with another driver.
pub fn update_driver(
    conn: &mut SqliteConnection,
    driver_id: i64,
    changes: &DriverChanges,
) -> Result<Driver, PersistenceError> {
    info!(driver_id, "Updating driver");

    let row: DriverRow = diesel::update(drivers::table.filter(drivers::driver_id.eq(driver_id)))
        .set(changes)
        .get_result(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Driver {driver_id}"))
            }
            other => other.into(),
        })?;

    Driver::try_from(row)
}

/// Hard-deletes a driver.
///
/// # Errors
///
/// Returns `NotFound` if the driver does not exist.
pub fn delete_driver(conn: &mut SqliteConnection, driver_id: i64) -> Result<(), PersistenceError> {
    info!(driver_id, "Deleting driver");

    let deleted: usize =
        diesel::delete(drivers::table.filter(drivers::driver_id.eq(driver_id))).execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("Driver {driver_id}")));
    }
    Ok(())
}
