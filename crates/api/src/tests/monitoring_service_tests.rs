// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request_response::{
    AssignBookingRequest, ChangeBookingStatusRequest, RecordLocationRequest,
    UpdateAmbulanceRequest,
};
use crate::{bookings, fleet, monitoring};

use super::{add_ambulance, add_driver, booking_request, store, test_now, verify_phone};

fn location(latitude: f64, longitude: f64) -> RecordLocationRequest {
    RecordLocationRequest {
        latitude,
        longitude,
        speed: Some(42.0),
        heading: Some(180.0),
        accuracy: Some(5.0),
    }
}

#[test]
fn test_location_report_updates_current_position() {
    let mut store = store();
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    let (updated, sample) =
        monitoring::record_location(&mut store, ambulance.ambulance_id, &location(9.98, 76.30))
            .expect("Failed to record location");

    assert_eq!(updated.current_latitude, Some(9.98));
    assert_eq!(updated.current_longitude, Some(76.30));
    assert_eq!(sample.ambulance_id, ambulance.ambulance_id);
}

#[test]
fn test_out_of_range_coordinates_are_rejected() {
    let mut store = store();
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    let err =
        monitoring::record_location(&mut store, ambulance.ambulance_id, &location(91.0, 76.30))
            .expect_err("Latitude beyond 90 must be rejected");
    assert_eq!(err.kind(), "validation_error");

    let err =
        monitoring::record_location(&mut store, ambulance.ambulance_id, &location(9.98, -181.0))
            .expect_err("Longitude beyond -180 must be rejected");
    assert_eq!(err.kind(), "validation_error");
}

#[test]
fn test_history_returns_newest_first_and_respects_limit() {
    let mut store = store();
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    for i in 0..5 {
        monitoring::record_location(
            &mut store,
            ambulance.ambulance_id,
            &location(9.98 + f64::from(i) * 0.01, 76.30),
        )
        .expect("Failed to record location");
    }

    let history = monitoring::location_history(&mut store, ambulance.ambulance_id, Some(3))
        .expect("Failed to fetch history");
    assert_eq!(history.len(), 3);
    assert!(history[0].location_id > history[1].location_id);
}

#[test]
fn test_unknown_ambulance_history_is_not_found() {
    let mut store = store();
    let err = monitoring::location_history(&mut store, 404, None)
        .expect_err("Unknown ambulance must be 404");
    assert_eq!(err.kind(), "not_found");
}

#[test]
fn test_located_ambulances_excludes_silent_vehicles() {
    let mut store = store();
    let reporting = add_ambulance(&mut store, "KA-01-AB-1234");
    add_ambulance(&mut store, "KA-01-CD-5678");

    monitoring::record_location(&mut store, reporting.ambulance_id, &location(9.98, 76.30))
        .expect("Failed to record location");

    let located =
        monitoring::located_ambulances(&mut store).expect("Failed to list located vehicles");
    assert_eq!(located.len(), 1);
    assert_eq!(located[0].ambulance_id, reporting.ambulance_id);
}

#[test]
fn test_active_rides_need_active_status_and_a_vehicle() {
    let mut store = store();
    let now = test_now();
    verify_phone(&mut store, "+919900112233", now);
    let driver = add_driver(&mut store, "Ravi Kumar", "+911234500001");
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    let riding = bookings::create_booking_at(&mut store, &booking_request("+919900112233"), now)
        .expect("Failed to create booking");
    bookings::assign_booking(
        &mut store,
        riding.booking.booking_id,
        &AssignBookingRequest {
            ambulance_id: ambulance.ambulance_id,
            driver_id: driver.driver_id,
        },
        "ops@medfleet.example",
    )
    .expect("Failed to assign booking");
    bookings::change_booking_status(
        &mut store,
        riding.booking.booking_id,
        &ChangeBookingStatusRequest {
            status: String::from("active"),
        },
        "ops@medfleet.example",
    )
    .expect("Failed to activate booking");

    // Active status but no vehicle; must not count as a ride.
    let unassigned =
        bookings::create_booking_at(&mut store, &booking_request("+919900112233"), now)
            .expect("Failed to create booking");
    bookings::change_booking_status(
        &mut store,
        unassigned.booking.booking_id,
        &ChangeBookingStatusRequest {
            status: String::from("active"),
        },
        "ops@medfleet.example",
    )
    .expect("Failed to activate booking");

    let rides = monitoring::active_rides(&mut store).expect("Failed to list active rides");
    assert_eq!(rides.len(), 1);
    assert_eq!(rides[0].booking.booking_id, riding.booking.booking_id);
    assert!(rides[0].ambulance.is_some());
}

#[test]
fn test_status_overview_counts_duty_states() {
    let mut store = store();
    let a1 = add_ambulance(&mut store, "KA-01-AB-1234");
    let a2 = add_ambulance(&mut store, "KA-01-CD-5678");
    add_ambulance(&mut store, "KA-01-EF-9012");
    let a4 = add_ambulance(&mut store, "KA-01-GH-3456");

    fleet::update_ambulance(
        &mut store,
        a1.ambulance_id,
        &UpdateAmbulanceRequest {
            status: Some(String::from("on_duty")),
            ..UpdateAmbulanceRequest::default()
        },
    )
    .expect("Failed to update ambulance");
    fleet::update_ambulance(
        &mut store,
        a2.ambulance_id,
        &UpdateAmbulanceRequest {
            status: Some(String::from("in_use")),
            ..UpdateAmbulanceRequest::default()
        },
    )
    .expect("Failed to update ambulance");
    fleet::update_ambulance(
        &mut store,
        a4.ambulance_id,
        &UpdateAmbulanceRequest {
            status: Some(String::from("maintenance")),
            ..UpdateAmbulanceRequest::default()
        },
    )
    .expect("Failed to update ambulance");

    let overview = monitoring::status_overview(&mut store).expect("Failed to compute overview");
    assert_eq!(overview.total_ambulances, 4);
    assert_eq!(overview.available_ambulances, 1);
    assert_eq!(overview.on_duty_ambulances, 2);
    assert!((overview.utilization_percent - 50.0).abs() < f64::EPSILON);
}

#[test]
fn test_empty_fleet_overview_has_zero_utilization() {
    let mut store = store();
    let overview = monitoring::status_overview(&mut store).expect("Failed to compute overview");
    assert_eq!(overview.total_ambulances, 0);
    assert!((overview.utilization_percent).abs() < f64::EPSILON);
}
