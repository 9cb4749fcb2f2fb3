// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Driver queries.

use diesel::prelude::*;
use tracing::debug;

use medfleet_domain::{Driver, DriverStatus};

use crate::data_models::DriverRow;
use crate::diesel_schema::drivers;
use crate::error::PersistenceError;

/// Fetches a driver by ID.
///
/// # Errors
///
/// Returns `NotFound` if the driver does not exist.
pub fn get_driver(conn: &mut SqliteConnection, driver_id: i64) -> Result<Driver, PersistenceError> {
    let row: DriverRow = drivers::table
        .filter(drivers::driver_id.eq(driver_id))
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Driver {driver_id}"))
            }
            other => other.into(),
        })?;

    Driver::try_from(row)
}

/// Fetches a driver by phone number, if one exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_driver_by_phone(
    conn: &mut SqliteConnection,
    phone: &str,
) -> Result<Option<Driver>, PersistenceError> {
    let row: Option<DriverRow> = drivers::table
        .filter(drivers::phone.eq(phone))
        .first(conn)
        .optional()?;

    row.map(Driver::try_from).transpose()
}

/// Lists drivers, optionally filtered by status, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be mapped.
pub fn list_drivers(
    conn: &mut SqliteConnection,
    status: Option<DriverStatus>,
) -> Result<Vec<Driver>, PersistenceError> {
    debug!(?status, "Listing drivers");

    let mut query = drivers::table.into_boxed();
    if let Some(status) = status {
        query = query.filter(drivers::status.eq(status.as_str()));
    }

    let rows: Vec<DriverRow> = query.order(drivers::name.asc()).load(conn)?;
    rows.into_iter().map(Driver::try_from).collect()
}
