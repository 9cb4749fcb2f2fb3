// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle operations.
//!
//! Creation is the only public (unauthenticated) write and is gated on a
//! current phone verification; everything else acts on behalf of an admin
//! whose email is threaded into the event log.

use time::{Date, OffsetDateTime};

use medfleet_domain::{Booking, generate_date_range};
use medfleet_persistence::{BookingChanges, NewBooking, Persistence};

use crate::convert::{parse_booking_status, parse_date, require_non_empty, stamp};
use crate::error::ApiError;
use crate::request_response::{
    AssignBookingRequest, BookingView, ChangeBookingStatusRequest, CreateBookingRequest,
    UpdateBookingRequest,
};

fn view_of(persistence: &mut Persistence, booking: Booking) -> Result<BookingView, ApiError> {
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
}

/// Creates a booking at `now`, enforcing the phone-verification gate.
///
/// The phone must carry a verification confirmed within the last
/// twenty-four hours; the stored booking then records `phone_verified` and
/// starts in `pending` with its creation event logged atomically.
///
/// # Errors
///
/// * `validation_error` - missing fields, bad dates, or unverified phone
/// * `invalid_range` - return-trip range reversed or over thirty days
pub fn create_booking_at(
    persistence: &mut Persistence,
    request: &CreateBookingRequest,
    now: OffsetDateTime,
) -> Result<BookingView, ApiError> {
    require_non_empty("patient_name", &request.patient_name)?;
    require_non_empty("phone", &request.phone)?;
    require_non_empty("from_address", &request.from_address)?;
    require_non_empty("to_address", &request.to_address)?;
    require_non_empty("pickup_time", &request.pickup_time)?;

    let from_date: Date = parse_date("from_date", &request.from_date)?;
    let to_date: Option<Date> = request
        .to_date
        .as_deref()
        .map(|s| parse_date("to_date", s))
        .transpose()?;
    if let Some(to_date) = to_date {
        // Same horizon as roster ranges; also rejects a return before the
        // outbound trip.
        generate_date_range(from_date, to_date)?;
    }

    if !persistence.is_phone_verified(&request.phone, now)? {
        return Err(ApiError::InvalidInput {
            field: String::from("phone"),
            message: String::from("Phone number is not verified"),
        });
    }

    let created_at = stamp(now)?;
    let booking = persistence.create_booking(&NewBooking {
        patient_name: request.patient_name.clone(),
        phone: request.phone.clone(),
        phone_verified: 1,
        from_address: request.from_address.clone(),
        from_latitude: request.from_latitude,
        from_longitude: request.from_longitude,
        to_address: request.to_address.clone(),
        to_latitude: request.to_latitude,
        to_longitude: request.to_longitude,
        from_date: request.from_date.clone(),
        to_date: request.to_date.clone(),
        pickup_time: request.pickup_time.clone(),
        notes: request.notes.clone(),
        status: String::from("pending"),
        created_at: created_at.clone(),
        updated_at: created_at,
    })?;

    view_of(persistence, booking)
}

/// Creates a booking at the current instant.
///
/// # Errors
///
/// See [`create_booking_at`].
pub fn create_booking(
    persistence: &mut Persistence,
    request: &CreateBookingRequest,
) -> Result<BookingView, ApiError> {
    create_booking_at(persistence, request, OffsetDateTime::now_utc())
}

/// Edits a booking's patient, address, and schedule fields on behalf of an
/// admin. Status and assignment are untouched.
///
/// # Errors
///
/// Returns `not_found` for an unknown booking and `validation_error` for an
/// empty edit or unparseable dates.
pub fn update_booking(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &UpdateBookingRequest,
    admin_email: &str,
) -> Result<BookingView, ApiError> {
    if let Some(from_date) = request.from_date.as_deref() {
        parse_date("from_date", from_date)?;
    }
    if let Some(to_date) = request.to_date.as_deref() {
        parse_date("to_date", to_date)?;
    }

    let now = OffsetDateTime::now_utc();
    let changes = BookingChanges {
        patient_name: request.patient_name.clone(),
        phone: request.phone.clone(),
        from_address: request.from_address.clone(),
        from_latitude: request.from_latitude,
        from_longitude: request.from_longitude,
        to_address: request.to_address.clone(),
        to_latitude: request.to_latitude,
        to_longitude: request.to_longitude,
        from_date: request.from_date.clone(),
        to_date: request.to_date.clone(),
        pickup_time: request.pickup_time.clone(),
        notes: request.notes.clone(),
        updated_at: Some(stamp(now)?),
    };

    let booking =
        persistence.update_booking(booking_id, &changes, admin_email.to_string(), now)?;
    view_of(persistence, booking)
}

/// Overwrites a booking's status on behalf of an admin.
///
/// Any recognized status is accepted regardless of the current one; the
/// transition is recorded in the event log with both values.
///
/// # Errors
///
/// Returns `not_found` for an unknown booking and `validation_error` for an
/// unrecognized status.
pub fn change_booking_status(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &ChangeBookingStatusRequest,
    admin_email: &str,
) -> Result<BookingView, ApiError> {
    let requested = parse_booking_status(&request.status)?;
    let booking = persistence.change_booking_status(
        booking_id,
        requested,
        admin_email.to_string(),
        OffsetDateTime::now_utc(),
    )?;
    view_of(persistence, booking)
}

/// Binds a driver and vehicle to a booking on behalf of an admin.
///
/// Both entities must be `available`; on success the booking moves to
/// `assigned` and the event log captures vehicle-number and driver-name
/// snapshots.
///
/// # Errors
///
/// * `not_found` - unknown booking, driver, or ambulance
/// * `driver_unavailable` / `ambulance_unavailable` - entity not `available`
pub fn assign_booking(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &AssignBookingRequest,
    admin_email: &str,
) -> Result<BookingView, ApiError> {
    let booking = persistence.assign_booking(
        booking_id,
        request.ambulance_id,
        request.driver_id,
        admin_email.to_string(),
        OffsetDateTime::now_utc(),
    )?;
    view_of(persistence, booking)
}

/// Deletes a booking and its event log.
///
/// # Errors
///
/// Returns `not_found` if the booking does not exist.
pub fn delete_booking(persistence: &mut Persistence, booking_id: i64) -> Result<(), ApiError> {
    persistence.delete_booking(booking_id)?;
    Ok(())
}

/// Fetches one booking with its event history, newest event first.
///
/// # Errors
///
/// Returns `not_found` if the booking does not exist.
pub fn get_booking(
    persistence: &mut Persistence,
    booking_id: i64,
) -> Result<BookingView, ApiError> {
    let booking = persistence.get_booking(booking_id)?;
    view_of(persistence, booking)
}

/// Lists bookings newest first, optionally filtered by status, each with
/// its event history embedded.
///
/// # Errors
///
/// Returns `validation_error` for an unrecognized status filter.
pub fn list_bookings(
    persistence: &mut Persistence,
    status: Option<&str>,
) -> Result<Vec<BookingView>, ApiError> {
    let status = status.map(parse_booking_status).transpose()?;
    let bookings = persistence.list_bookings(status)?;
    bookings
        .into_iter()
        .map(|b| view_of(persistence, b))
        .collect()
}
