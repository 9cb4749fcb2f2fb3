// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::assignments::{
    self, ConflictPolicy, available_ambulances, available_drivers, available_drivers_for_range,
};
use crate::error::ApiError;
use crate::request_response::{BatchCreateAssignmentsRequest, CreateAssignmentRequest, UpdateAssignmentRequest};

use super::{add_ambulance, add_driver, store};

fn assignment_request(driver_id: i64, ambulance_id: i64, shift: &str) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        duty_date: String::from("2026-03-15"),
        shift: shift.to_string(),
        driver_id,
        ambulance_id,
        notes: None,
    }
}

#[test]
fn test_create_assignment_returns_embedded_entities() {
    let mut store = store();
    let driver = add_driver(&mut store, "Ravi Kumar", "+911234500001");
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    let view = assignments::create_assignment(
        &mut store,
        &assignment_request(driver.driver_id, ambulance.ambulance_id, "morning"),
        ConflictPolicy::default(),
    )
    .expect("Failed to create assignment");

    assert_eq!(view.driver.name, "Ravi Kumar");
    assert_eq!(view.ambulance.vehicle_no, "KA-01-AB-1234");
    assert_eq!(view.assignment.driver_id, driver.driver_id);
}

#[test]
fn test_duplicate_ambulance_slot_surfaces_slot_taken() {
    let mut store = store();
    let d1 = add_driver(&mut store, "Ravi Kumar", "+911234500001");
    let d2 = add_driver(&mut store, "Suresh Menon", "+911234500002");
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    assignments::create_assignment(
        &mut store,
        &assignment_request(d1.driver_id, ambulance.ambulance_id, "morning"),
        ConflictPolicy::default(),
    )
    .expect("First assignment should succeed");

    let err = assignments::create_assignment(
        &mut store,
        &assignment_request(d2.driver_id, ambulance.ambulance_id, "morning"),
        ConflictPolicy::default(),
    )
    .expect_err("Same ambulance, date, and shift must be rejected");

    assert_eq!(err.kind(), "slot_taken");
}

#[test]
fn test_unparseable_shift_is_validation_error() {
    let mut store = store();
    let driver = add_driver(&mut store, "Ravi Kumar", "+911234500001");
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    let err = assignments::create_assignment(
        &mut store,
        &assignment_request(driver.driver_id, ambulance.ambulance_id, "evening"),
        ConflictPolicy::default(),
    )
    .expect_err("Unknown shift must be rejected");

    assert_eq!(err.kind(), "validation_error");
}

#[test]
fn test_batch_applies_entries_independently() {
    let mut store = store();
    let d1 = add_driver(&mut store, "Ravi Kumar", "+911234500001");
    let d2 = add_driver(&mut store, "Suresh Menon", "+911234500002");
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    let outcomes = assignments::create_assignments_batch(
        &mut store,
        &BatchCreateAssignmentsRequest {
            assignments: vec![
                assignment_request(d1.driver_id, ambulance.ambulance_id, "morning"),
                // Same ambulance slot as the first entry.
                assignment_request(d2.driver_id, ambulance.ambulance_id, "morning"),
                assignment_request(d2.driver_id, ambulance.ambulance_id, "night"),
            ],
        },
        ConflictPolicy::default(),
    );

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].assignment.is_some());
    let error = outcomes[1].error.as_ref().expect("Second entry must fail");
    assert_eq!(error.kind, "slot_taken");
    assert!(
        outcomes[2].assignment.is_some(),
        "A failed entry must not block later entries"
    );

    let listed = assignments::list_assignments_for_date(&mut store, "2026-03-15")
        .expect("Failed to list assignments");
    assert_eq!(listed.len(), 2);
}

#[test]
fn test_empty_update_is_rejected() {
    let mut store = store();
    let driver = add_driver(&mut store, "Ravi Kumar", "+911234500001");
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    let view = assignments::create_assignment(
        &mut store,
        &assignment_request(driver.driver_id, ambulance.ambulance_id, "morning"),
        ConflictPolicy::default(),
    )
    .expect("Failed to create assignment");

    let err = assignments::update_assignment(
        &mut store,
        view.assignment.assignment_id,
        &UpdateAssignmentRequest::default(),
        ConflictPolicy::default(),
    )
    .expect_err("An update with no fields must be rejected");

    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_strict_update_excludes_own_slot() {
    let mut store = store();
    let driver = add_driver(&mut store, "Ravi Kumar", "+911234500001");
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    let view = assignments::create_assignment(
        &mut store,
        &assignment_request(driver.driver_id, ambulance.ambulance_id, "morning"),
        ConflictPolicy::Strict,
    )
    .expect("Failed to create assignment");

    // Re-submitting the same driver only "conflicts" with the row being
    // edited, which the slot check excludes.
    let updated = assignments::update_assignment(
        &mut store,
        view.assignment.assignment_id,
        &UpdateAssignmentRequest {
            driver_id: Some(driver.driver_id),
            notes: Some(String::from("shift brief at 06:30")),
            ..UpdateAssignmentRequest::default()
        },
        ConflictPolicy::Strict,
    )
    .expect("An edit must not conflict with its own slot");

    assert_eq!(updated.assignment.driver_id, driver.driver_id);
    assert_eq!(updated.assignment.notes.as_deref(), Some("shift brief at 06:30"));
}

#[test]
fn test_availability_hides_rostered_entities() {
    let mut store = store();
    let d1 = add_driver(&mut store, "Ravi Kumar", "+911234500001");
    let d2 = add_driver(&mut store, "Suresh Menon", "+911234500002");
    let a1 = add_ambulance(&mut store, "KA-01-AB-1234");
    let a2 = add_ambulance(&mut store, "KA-01-CD-5678");

    assignments::create_assignment(
        &mut store,
        &assignment_request(d1.driver_id, a1.ambulance_id, "morning"),
        ConflictPolicy::default(),
    )
    .expect("Failed to create assignment");

    let drivers = available_drivers(&mut store, "2026-03-15", "morning")
        .expect("Failed to list available drivers");
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].driver_id, d2.driver_id);

    let ambulances = available_ambulances(&mut store, "2026-03-15", "morning")
        .expect("Failed to list available ambulances");
    assert_eq!(ambulances.len(), 1);
    assert_eq!(ambulances[0].ambulance_id, a2.ambulance_id);

    // The same entities are free again on the untouched night shift.
    let night_drivers = available_drivers(&mut store, "2026-03-15", "night")
        .expect("Failed to list available drivers");
    assert_eq!(night_drivers.len(), 2);
}

#[test]
fn test_range_availability_requires_every_day_free() {
    let mut store = store();
    let d1 = add_driver(&mut store, "Ravi Kumar", "+911234500001");
    let d2 = add_driver(&mut store, "Suresh Menon", "+911234500002");
    let ambulance = add_ambulance(&mut store, "KA-01-AB-1234");

    // d1 is rostered on the middle day of the range.
    assignments::create_assignment(
        &mut store,
        &CreateAssignmentRequest {
            duty_date: String::from("2026-03-16"),
            shift: String::from("morning"),
            driver_id: d1.driver_id,
            ambulance_id: ambulance.ambulance_id,
            notes: None,
        },
        ConflictPolicy::default(),
    )
    .expect("Failed to create assignment");

    let drivers =
        available_drivers_for_range(&mut store, "2026-03-15", "2026-03-17", "morning")
            .expect("Failed to list available drivers for range");
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].driver_id, d2.driver_id);
}

#[test]
fn test_reversed_range_is_invalid_range() {
    let mut store = store();
    let err = available_drivers_for_range(&mut store, "2026-03-17", "2026-03-15", "morning")
        .expect_err("Reversed range must be rejected");
    assert_eq!(err.kind(), "invalid_range");
}

#[test]
fn test_range_over_roster_horizon_is_invalid_range() {
    let mut store = store();
    let err = available_drivers_for_range(&mut store, "2026-03-01", "2026-04-15", "morning")
        .expect_err("A 46-day range must be rejected");
    assert_eq!(err.kind(), "invalid_range");
}
