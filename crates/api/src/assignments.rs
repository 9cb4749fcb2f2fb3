// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Duty roster operations.

use time::{Date, OffsetDateTime};
use tracing::info;

use medfleet_domain::{
    Ambulance, Assignment, Driver, RosterEntity, Shift, generate_date_range, is_entity_available,
    is_entity_available_for_all,
};
use medfleet_persistence::Persistence;

use crate::convert::{parse_assignment_status, parse_date, parse_shift};
use crate::error::ApiError;
use crate::request_response::{
    AssignmentView, BatchAssignmentOutcome, BatchCreateAssignmentsRequest, CreateAssignmentRequest,
    ErrorBody, UpdateAssignmentRequest,
};

/// Which conflict axes are enforced when writing to the roster.
///
/// The ambulance axis is always enforced. The default leaves the driver axis
/// unchecked at write time, matching the long-standing behavior operators
/// rely on; availability listings still hide double-booked drivers either
/// way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Reject only ambulance double-booking.
    #[default]
    AmbulanceOnly,
    /// Also reject driver double-booking for the same date and shift.
    Strict,
}

impl ConflictPolicy {
    const fn strict_driver_conflicts(self) -> bool {
        matches!(self, Self::Strict)
    }
}

fn view_of(
    persistence: &mut Persistence,
    assignment: Assignment,
) -> Result<AssignmentView, ApiError> {
    let driver: Driver = persistence.get_driver(assignment.driver_id)?;
    let ambulance: Ambulance = persistence.get_ambulance(assignment.ambulance_id)?;
    Ok(AssignmentView {
        driver: (&driver).into(),
        ambulance: (&ambulance).into(),
        assignment,
    })
}

/// Creates one roster assignment.
///
/// # Errors
///
/// * `validation_error` - unparseable date or shift
/// * `slot_taken` - the ambulance already has an assignment for this slot
/// * `driver_unavailable` / `ambulance_unavailable` - entity not `available`
/// * `not_found` - unknown driver or ambulance
pub fn create_assignment(
    persistence: &mut Persistence,
    request: &CreateAssignmentRequest,
    policy: ConflictPolicy,
) -> Result<AssignmentView, ApiError> {
    let duty_date: Date = parse_date("duty_date", &request.duty_date)?;
    let shift: Shift = parse_shift(&request.shift)?;

    let assignment = persistence.create_assignment(
        duty_date,
        shift,
        request.driver_id,
        request.ambulance_id,
        request.notes.clone(),
        policy.strict_driver_conflicts(),
        OffsetDateTime::now_utc(),
    )?;

    view_of(persistence, assignment)
}

/// Creates a batch of assignments, applying each entry independently.
///
/// A failed entry never rolls back an earlier committed one; the caller
/// receives one outcome per entry, in input order.
pub fn create_assignments_batch(
    persistence: &mut Persistence,
    request: &BatchCreateAssignmentsRequest,
    policy: ConflictPolicy,
) -> Vec<BatchAssignmentOutcome> {
    info!(
        entries = request.assignments.len(),
        "Creating assignment batch"
    );

    request
        .assignments
        .iter()
        .enumerate()
        .map(
            |(index, entry)| match create_assignment(persistence, entry, policy) {
                Ok(view) => BatchAssignmentOutcome {
                    index,
                    assignment: Some(view),
                    error: None,
                },
                Err(e) => BatchAssignmentOutcome {
                    index,
                    assignment: None,
                    error: Some(ErrorBody {
                        kind: e.kind().to_string(),
                        message: e.to_string(),
                    }),
                },
            },
        )
        .collect()
}

/// Applies a partial update to an assignment.
///
/// # Errors
///
/// Returns `not_found` for an unknown assignment or driver,
/// `driver_unavailable` when a driver change fails re-validation, and
/// `validation_error` for an unparseable status.
pub fn update_assignment(
    persistence: &mut Persistence,
    assignment_id: i64,
    request: &UpdateAssignmentRequest,
    policy: ConflictPolicy,
) -> Result<AssignmentView, ApiError> {
    if request.driver_id.is_none() && request.status.is_none() && request.notes.is_none() {
        return Err(ApiError::InvalidInput {
            field: String::from("body"),
            message: String::from("at least one field must be provided"),
        });
    }

    let status = request
        .status
        .as_deref()
        .map(parse_assignment_status)
        .transpose()?;

    let assignment = persistence.update_assignment(
        assignment_id,
        request.driver_id,
        status,
        request.notes.clone(),
        policy.strict_driver_conflicts(),
    )?;

    view_of(persistence, assignment)
}

/// Hard-deletes an assignment.
///
/// # Errors
///
/// Returns `not_found` if the assignment does not exist.
pub fn delete_assignment(
    persistence: &mut Persistence,
    assignment_id: i64,
) -> Result<(), ApiError> {
    persistence.delete_assignment(assignment_id)?;
    Ok(())
}

/// Fetches one assignment with its driver and vehicle embedded.
///
/// # Errors
///
/// Returns `not_found` if the assignment does not exist.
pub fn get_assignment(
    persistence: &mut Persistence,
    assignment_id: i64,
) -> Result<AssignmentView, ApiError> {
    let assignment = persistence.get_assignment(assignment_id)?;
    view_of(persistence, assignment)
}

/// Lists assignments with optional date-range and ambulance filters, sorted
/// by date then shift.
///
/// # Errors
///
/// Returns `validation_error` for unparseable dates.
pub fn list_assignments(
    persistence: &mut Persistence,
    start_date: Option<&str>,
    end_date: Option<&str>,
    ambulance_id: Option<i64>,
) -> Result<Vec<AssignmentView>, ApiError> {
    let start = start_date.map(|s| parse_date("start_date", s)).transpose()?;
    let end = end_date.map(|s| parse_date("end_date", s)).transpose()?;

    let assignments = persistence.list_assignments_filtered(start, end, ambulance_id)?;
    assignments
        .into_iter()
        .map(|a| view_of(persistence, a))
        .collect()
}

/// Lists the assignments for one date, sorted by shift.
///
/// # Errors
///
/// Returns `validation_error` for an unparseable date.
pub fn list_assignments_for_date(
    persistence: &mut Persistence,
    date: &str,
) -> Result<Vec<AssignmentView>, ApiError> {
    let duty_date: Date = parse_date("date", date)?;
    let assignments = persistence.list_assignments(Some(duty_date))?;
    assignments
        .into_iter()
        .map(|a| view_of(persistence, a))
        .collect()
}

/// Lists the drivers free for a given date and shift: status `available`
/// and not already rostered in that slot.
///
/// # Errors
///
/// Returns `validation_error` for an unparseable date or shift.
pub fn available_drivers(
    persistence: &mut Persistence,
    date: &str,
    shift: &str,
) -> Result<Vec<Driver>, ApiError> {
    let duty_date: Date = parse_date("date", date)?;
    let shift: Shift = parse_shift(shift)?;

    let slots = persistence.slots_for(duty_date, shift)?;
    let drivers = persistence.list_drivers(None)?;

    Ok(drivers
        .into_iter()
        .filter(|d| {
            is_entity_available(
                d.status.is_available(),
                RosterEntity::Driver(d.driver_id),
                duty_date,
                shift,
                &slots,
                None,
            )
        })
        .collect())
}

/// Lists the ambulances free for a given date and shift.
///
/// # Errors
///
/// Returns `validation_error` for an unparseable date or shift.
pub fn available_ambulances(
    persistence: &mut Persistence,
    date: &str,
    shift: &str,
) -> Result<Vec<Ambulance>, ApiError> {
    let duty_date: Date = parse_date("date", date)?;
    let shift: Shift = parse_shift(shift)?;

    let slots = persistence.slots_for(duty_date, shift)?;
    let ambulances = persistence.list_ambulances(None)?;

    Ok(ambulances
        .into_iter()
        .filter(|a| {
            is_entity_available(
                a.status.is_available(),
                RosterEntity::Ambulance(a.ambulance_id),
                duty_date,
                shift,
                &slots,
                None,
            )
        })
        .collect())
}

/// Lists the drivers free for a given shift on every day of an inclusive
/// date range.
///
/// # Errors
///
/// Returns `invalid_range` for a reversed range or one longer than the
/// thirty-day roster horizon.
pub fn available_drivers_for_range(
    persistence: &mut Persistence,
    start_date: &str,
    end_date: &str,
    shift: &str,
) -> Result<Vec<Driver>, ApiError> {
    let start: Date = parse_date("start_date", start_date)?;
    let end: Date = parse_date("end_date", end_date)?;
    let shift: Shift = parse_shift(shift)?;

    let dates = generate_date_range(start, end)?;
    let slots = persistence.slots_between(start, end)?;
    let drivers = persistence.list_drivers(None)?;

    Ok(drivers
        .into_iter()
        .filter(|d| {
            is_entity_available_for_all(
                d.status.is_available(),
                RosterEntity::Driver(d.driver_id),
                &dates,
                shift,
                &slots,
                None,
            )
        })
        .collect())
}
