// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle mutations.
//!
//! Every mutation that touches a booking also appends its event to the
//! `booking_events` log in the same transaction, so the log and the row can
//! never disagree. Events are append-only; nothing in this crate updates or
//! deletes a logged event except the cascade in [`delete_booking`].

use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::info;

use medfleet_audit::{BookingEvent, EventPayload};
use medfleet_domain::{Ambulance, Booking, BookingStatus, Driver, apply_status_change};

use crate::data_models::{BookingChanges, BookingEventRow, BookingRow, NewBooking, NewBookingEvent};
use crate::diesel_schema::{booking_events, bookings};
use crate::error::PersistenceError;
use crate::iso;
use crate::queries;

/// Appends one event to a booking's log. Must run inside the caller's
/// transaction.
fn append_event(
    conn: &mut SqliteConnection,
    booking_id: i64,
    payload: &EventPayload,
    created_at: String,
) -> Result<BookingEvent, PersistenceError> {
    let row: BookingEventRow = diesel::insert_into(booking_events::table)
        .values(&NewBookingEvent {
            booking_id,
            event_type: payload.event_type().to_string(),
            payload_json: payload.to_json()?,
            created_at,
        })
        .get_result(conn)?;

    BookingEvent::try_from(row)
}

/// Creates a booking and logs its creation event atomically.
///
/// The caller is responsible for the phone-verification gate; by the time a
/// booking reaches this function it is assumed to have passed.
///
/// # Errors
///
/// Returns an error if the insert or the event append fails.
pub fn create_booking(
    conn: &mut SqliteConnection,
    new: &NewBooking,
) -> Result<Booking, PersistenceError> {
    info!(patient_name = %new.patient_name, "Creating booking");

    conn.transaction(|conn| {
        let row: BookingRow = diesel::insert_into(bookings::table)
            .values(new)
            .get_result(conn)?;

        let booking = Booking::try_from(row)?;

        append_event(
            conn,
            booking.booking_id,
            &EventPayload::BookingCreated {
                patient_name: booking.patient_name.clone(),
                phone: booking.phone.clone(),
                from_address: booking.from_address.clone(),
                to_address: booking.to_address.clone(),
            },
            booking.created_at.clone(),
        )?;

        Ok(booking)
    })
}

/// Applies a partial update to a booking's patient, address, and schedule
/// fields, logging the update.
///
/// # Errors
///
/// Returns `NotFound` if the booking does not exist.
pub fn update_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
    changes: &BookingChanges,
    updated_by: String,
    now: OffsetDateTime,
) -> Result<Booking, PersistenceError> {
    info!(booking_id, "Updating booking");

    let stamp: String = iso(now)?;

    conn.transaction(|conn| {
        let row: BookingRow =
            diesel::update(bookings::table.filter(bookings::booking_id.eq(booking_id)))
                .set(changes)
                .get_result(conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => {
                        PersistenceError::NotFound(format!("Booking {booking_id}"))
                    }
                    other => other.into(),
                })?;

        append_event(
            conn,
            booking_id,
            &EventPayload::BookingUpdated { updated_by },
            stamp,
        )?;

        Booking::try_from(row)
    })
}

/// Moves a booking to the requested status and logs the transition.
///
/// Any requested status is accepted regardless of the current one; the only
/// validation is that the value is a known status, which the caller's parse
/// already established. The old and new values are both captured in the
/// event, so the log records every hop even when the transition is unusual.
///
/// # Errors
///
/// Returns `NotFound` if the booking does not exist.
pub fn change_booking_status(
    conn: &mut SqliteConnection,
    booking_id: i64,
    requested: BookingStatus,
    changed_by: String,
    now: OffsetDateTime,
) -> Result<Booking, PersistenceError> {
    info!(booking_id, status = requested.as_str(), "Changing booking status");

    let stamp: String = iso(now)?;

    conn.transaction(|conn| {
        let current: Booking = queries::bookings::get_booking(conn, booking_id)?;
        let next: BookingStatus = apply_status_change(current.status, requested);

        let row: BookingRow =
            diesel::update(bookings::table.filter(bookings::booking_id.eq(booking_id)))
                .set((
                    bookings::status.eq(next.as_str()),
                    bookings::updated_at.eq(stamp.clone()),
                ))
                .get_result(conn)?;

        append_event(
            conn,
            booking_id,
            &EventPayload::StatusChanged {
                old_status: current.status,
                new_status: next,
                changed_by,
            },
            stamp,
        )?;

        Booking::try_from(row)
    })
}

/// Assigns an ambulance and driver to a booking, moving it to `assigned`.
///
/// Both entities must exist and carry an `available` status; the ambulance
/// is checked first. The assignment event captures the vehicle number and
/// driver name at assignment time so the log stays meaningful even after the
/// fleet records change.
///
/// # Errors
///
/// * `NotFound` - booking, ambulance, or driver does not exist
/// * `AmbulanceUnavailable` / `DriverUnavailable` - entity status is not
///   `available`
pub fn assign_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
    ambulance_id: i64,
    driver_id: i64,
    assigned_by: String,
    now: OffsetDateTime,
) -> Result<Booking, PersistenceError> {
    info!(booking_id, ambulance_id, driver_id, "Assigning booking");

    let stamp: String = iso(now)?;

    conn.transaction(|conn| {
        // Existence check first so a missing booking reads as 404, not 409.
        let _: Booking = queries::bookings::get_booking(conn, booking_id)?;

        let ambulance: Ambulance = queries::ambulances::get_ambulance(conn, ambulance_id)?;
        if !ambulance.status.is_available() {
            return Err(PersistenceError::AmbulanceUnavailable(ambulance_id));
        }

        let driver: Driver = queries::drivers::get_driver(conn, driver_id)?;
        if !driver.status.is_available() {
            return Err(PersistenceError::DriverUnavailable(driver_id));
        }

        let row: BookingRow =
            diesel::update(bookings::table.filter(bookings::booking_id.eq(booking_id)))
                .set((
                    bookings::assigned_ambulance_id.eq(Some(ambulance_id)),
                    bookings::assigned_driver_id.eq(Some(driver_id)),
                    bookings::status.eq(BookingStatus::Assigned.as_str()),
                    bookings::updated_at.eq(stamp.clone()),
                ))
                .get_result(conn)?;

        append_event(
            conn,
            booking_id,
            &EventPayload::AmbulanceAssigned {
                ambulance_id,
                driver_id,
                vehicle_no: ambulance.vehicle_no,
                driver_name: driver.name,
                assigned_by,
            },
            stamp,
        )?;

        Booking::try_from(row)
    })
}

/// Deletes a booking along with its entire event log.
///
/// # Errors
///
/// Returns `NotFound` if the booking does not exist.
pub fn delete_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<(), PersistenceError> {
    info!(booking_id, "Deleting booking");

    conn.transaction(|conn| {
        diesel::delete(booking_events::table.filter(booking_events::booking_id.eq(booking_id)))
            .execute(conn)?;

        let deleted: usize =
            diesel::delete(bookings::table.filter(bookings::booking_id.eq(booking_id)))
                .execute(conn)?;

        if deleted == 0 {
            return Err(PersistenceError::NotFound(format!("Booking {booking_id}")));
        }
        Ok(())
    })
}
