// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Duration;

use medfleet_audit::EventPayload;
use medfleet_domain::BookingStatus;

use crate::bookings;
use crate::error::ApiError;
use crate::request_response::{
    AssignBookingRequest, ChangeBookingStatusRequest, UpdateBookingRequest,
};

use super::{add_ambulance, add_driver, booking_request, store, test_now, verify_phone};

const ADMIN: &str = "ops@medfleet.example";

#[test]
fn test_unverified_phone_cannot_book() {
    let mut store = store();

    let err = bookings::create_booking_at(&mut store, &booking_request("+919900112233"), test_now())
        .expect_err("Booking without a verified phone must be rejected");

    match err {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, "phone"),
        other => panic!("Expected a validation error, got {other:?}"),
    }
}

#[test]
fn test_verified_phone_books_and_logs_creation() {
    let mut store = store();
    let now = test_now();
    verify_phone(&mut store, "+919900112233", now);

    let view = bookings::create_booking_at(&mut store, &booking_request("+919900112233"), now)
        .expect("Failed to create booking");

    assert_eq!(view.booking.status, BookingStatus::Pending);
    assert!(view.booking.phone_verified);
    assert_eq!(view.events.len(), 1);
    assert!(matches!(
        view.events[0].payload,
        EventPayload::BookingCreated { .. }
    ));
}

#[test]
fn test_verification_lapses_after_a_day() {
    let mut store = store();
    let now = test_now();
    verify_phone(&mut store, "+919900112233", now);

    let err = bookings::create_booking_at(
        &mut store,
        &booking_request("+919900112233"),
        now + Duration::hours(25),
    )
    .expect_err("A day-old verification must not admit a booking");

    assert_eq!(err.kind(), "validation_error");
}

#[test]
fn test_return_trip_range_is_validated() {
    let mut store = store();
    let now = test_now();
    verify_phone(&mut store, "+919900112233", now);

    let mut request = booking_request("+919900112233");
    request.to_date = Some(String::from("2026-03-12"));

    let err = bookings::create_booking_at(&mut store, &request, now)
        .expect_err("A return before the outbound trip must be rejected");
    assert_eq!(err.kind(), "invalid_range");
}

#[test]
fn test_event_log_grows_with_every_mutation() {
    let mut store = store();
    let now = test_now();
    verify_phone(&mut store, "+919900112233", now);
    let driver = add_driver(&mut store, "Ravi Kumar", "+911234500001");
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    let view = bookings::create_booking_at(&mut store, &booking_request("+919900112233"), now)
        .expect("Failed to create booking");
    let id = view.booking.booking_id;

    bookings::change_booking_status(
        &mut store,
        id,
        &ChangeBookingStatusRequest {
            status: String::from("confirmed"),
        },
        ADMIN,
    )
    .expect("Failed to confirm booking");

    bookings::assign_booking(
        &mut store,
        id,
        &AssignBookingRequest {
            ambulance_id: ambulance.ambulance_id,
            driver_id: driver.driver_id,
        },
        ADMIN,
    )
    .expect("Failed to assign booking");

    bookings::update_booking(
        &mut store,
        id,
        &UpdateBookingRequest {
            notes: Some(String::from("Stretcher required")),
            ..UpdateBookingRequest::default()
        },
        ADMIN,
    )
    .expect("Failed to update booking");

    let final_view = bookings::get_booking(&mut store, id).expect("Failed to fetch booking");

    // Creation, status change, assignment, update: four mutations, four
    // events, newest first.
    assert_eq!(final_view.events.len(), 4);
    assert!(matches!(
        final_view.events[3].payload,
        EventPayload::BookingCreated { .. }
    ));
    assert!(matches!(
        final_view.events[0].payload,
        EventPayload::BookingUpdated { .. }
    ));
}

#[test]
fn test_assignment_embeds_snapshots_and_moves_status() {
    let mut store = store();
    let now = test_now();
    verify_phone(&mut store, "+919900112233", now);
    let driver = add_driver(&mut store, "Ravi Kumar", "+911234500001");
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    let view = bookings::create_booking_at(&mut store, &booking_request("+919900112233"), now)
        .expect("Failed to create booking");

    let assigned = bookings::assign_booking(
        &mut store,
        view.booking.booking_id,
        &AssignBookingRequest {
            ambulance_id: ambulance.ambulance_id,
            driver_id: driver.driver_id,
        },
        ADMIN,
    )
    .expect("Failed to assign booking");

    assert_eq!(assigned.booking.status, BookingStatus::Assigned);
    let driver_summary = assigned.driver.expect("Driver must be embedded");
    assert_eq!(driver_summary.name, "Ravi Kumar");
    let ambulance_summary = assigned.ambulance.expect("Ambulance must be embedded");
    assert_eq!(ambulance_summary.vehicle_no, "KA-01-AB-1234");

    match &assigned.events[0].payload {
        EventPayload::AmbulanceAssigned {
            vehicle_no,
            driver_name,
            assigned_by,
            ..
        } => {
            assert_eq!(vehicle_no, "KA-01-AB-1234");
            assert_eq!(driver_name, "Ravi Kumar");
            assert_eq!(assigned_by, ADMIN);
        }
        other => panic!("Expected an assignment event, got {other:?}"),
    }
}

#[test]
fn test_status_change_records_both_ends_of_the_transition() {
    let mut store = store();
    let now = test_now();
    verify_phone(&mut store, "+919900112233", now);

    let view = bookings::create_booking_at(&mut store, &booking_request("+919900112233"), now)
        .expect("Failed to create booking");

    let changed = bookings::change_booking_status(
        &mut store,
        view.booking.booking_id,
        &ChangeBookingStatusRequest {
            status: String::from("completed"),
        },
        ADMIN,
    )
    .expect("Any recognized status must be accepted");

    assert_eq!(changed.booking.status, BookingStatus::Completed);
    match &changed.events[0].payload {
        EventPayload::StatusChanged {
            old_status,
            new_status,
            changed_by,
        } => {
            assert_eq!(*old_status, BookingStatus::Pending);
            assert_eq!(*new_status, BookingStatus::Completed);
            assert_eq!(changed_by, ADMIN);
        }
        other => panic!("Expected a status change event, got {other:?}"),
    }
}

#[test]
fn test_unknown_booking_is_not_found() {
    let mut store = store();
    let err = bookings::get_booking(&mut store, 404).expect_err("Unknown booking must be 404");
    assert_eq!(err.kind(), "not_found");
}

#[test]
fn test_delete_removes_booking_and_history() {
    let mut store = store();
    let now = test_now();
    verify_phone(&mut store, "+919900112233", now);

    let view = bookings::create_booking_at(&mut store, &booking_request("+919900112233"), now)
        .expect("Failed to create booking");
    let id = view.booking.booking_id;

    bookings::delete_booking(&mut store, id).expect("Failed to delete booking");

    assert_eq!(
        bookings::get_booking(&mut store, id)
            .expect_err("Deleted booking must be gone")
            .kind(),
        "not_found"
    );
}

#[test]
fn test_list_filters_by_status() {
    let mut store = store();
    let now = test_now();
    verify_phone(&mut store, "+919900112233", now);

    let first = bookings::create_booking_at(&mut store, &booking_request("+919900112233"), now)
        .expect("Failed to create booking");
    bookings::create_booking_at(&mut store, &booking_request("+919900112233"), now)
        .expect("Failed to create booking");

    bookings::change_booking_status(
        &mut store,
        first.booking.booking_id,
        &ChangeBookingStatusRequest {
            status: String::from("cancelled"),
        },
        ADMIN,
    )
    .expect("Failed to cancel booking");

    let pending =
        bookings::list_bookings(&mut store, Some("pending")).expect("Failed to list bookings");
    assert_eq!(pending.len(), 1);

    let all = bookings::list_bookings(&mut store, None).expect("Failed to list bookings");
    assert_eq!(all.len(), 2);
}
