// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking and booking-event queries.

use diesel::prelude::*;
use tracing::debug;

use medfleet_audit::BookingEvent;
use medfleet_domain::{Booking, BookingStatus};

use crate::data_models::{BookingEventRow, BookingRow};
use crate::diesel_schema::{booking_events, bookings};
use crate::error::PersistenceError;

/// Fetches a booking by ID.
///
/// # Errors
///
/// Returns `NotFound` if the booking does not exist.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Booking, PersistenceError> {
    let row: BookingRow = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Booking {booking_id}"))
            }
            other => other.into(),
        })?;

    Booking::try_from(row)
}

/// Lists bookings, optionally filtered by status, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be mapped.
pub fn list_bookings(
    conn: &mut SqliteConnection,
    status: Option<BookingStatus>,
) -> Result<Vec<Booking>, PersistenceError> {
    debug!(?status, "Listing bookings");

    let mut query = bookings::table.into_boxed();
    if let Some(status) = status {
        query = query.filter(bookings::status.eq(status.as_str()));
    }

    let rows: Vec<BookingRow> = query.order(bookings::booking_id.desc()).load(conn)?;
    rows.into_iter().map(Booking::try_from).collect()
}

/// Lists rides currently on the road: status `active` with an ambulance
/// bound.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be mapped.
pub fn active_rides(conn: &mut SqliteConnection) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::status.eq(BookingStatus::Active.as_str()))
        .filter(bookings::assigned_ambulance_id.is_not_null())
        .order(bookings::booking_id.desc())
        .load(conn)?;

    rows.into_iter().map(Booking::try_from).collect()
}

/// Returns a booking's event log in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored event cannot be decoded.
pub fn events_for(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Vec<BookingEvent>, PersistenceError> {
    let rows: Vec<BookingEventRow> = booking_events::table
        .filter(booking_events::booking_id.eq(booking_id))
        .order(booking_events::event_id.asc())
        .load(conn)?;

    rows.into_iter().map(BookingEvent::try_from).collect()
}

/// Counts the events logged for a booking.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_events(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<i64, PersistenceError> {
    let count: i64 = booking_events::table
        .filter(booking_events::booking_id.eq(booking_id))
        .count()
        .get_result(conn)?;

    Ok(count)
}
