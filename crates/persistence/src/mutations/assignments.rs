// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment mutations.
//!
//! Every check-then-insert sequence here runs inside one transaction, and the
//! store additionally carries a unique index on (`duty_date`, shift,
//! `ambulance_id`), so two concurrent writers racing for the same slot cannot
//! both commit.

use diesel::prelude::*;
use time::{Date, OffsetDateTime};
use tracing::info;

use medfleet_domain::{
    Ambulance, Assignment, AssignmentStatus, Driver, RosterEntity, Shift, format_service_date,
    is_entity_available,
};

use crate::data_models::{AssignmentChanges, AssignmentRow, NewAssignment};
use crate::diesel_schema::assignments;
use crate::error::PersistenceError;
use crate::iso;
use crate::queries;

/// Creates a roster assignment after the availability checks pass.
///
/// Check order: ambulance slot, driver status, driver slot (strict policy
/// only), ambulance status. The driver-slot check is skipped unless
/// `strict_driver_conflicts` is set, reproducing the documented behavior in
/// which a driver's double-booking is only prevented by the availability
/// listings.
///
/// # Errors
///
/// * `SlotTaken` - an assignment already claims the ambulance for this slot
/// * `DriverUnavailable` / `AmbulanceUnavailable` - entity status is not
///   `available`
/// * `DriverSlotTaken` - strict policy only
/// * `NotFound` - the driver or ambulance does not exist
pub fn create_assignment(
    conn: &mut SqliteConnection,
    duty_date: Date,
    shift: Shift,
    driver_id: i64,
    ambulance_id: i64,
    notes: Option<String>,
    strict_driver_conflicts: bool,
    now: OffsetDateTime,
) -> Result<Assignment, PersistenceError> {
    info!(
        duty_date = %duty_date,
        shift = shift.as_str(),
        driver_id,
        ambulance_id,
        "Creating assignment"
    );

    let date_str: String = format_service_date(duty_date)?;
    let created_at: String = iso(now)?;

    conn.transaction(|conn| {
        let slots = queries::assignments::slots_for(conn, duty_date, shift)?;

        if !is_entity_available(
            true,
            RosterEntity::Ambulance(ambulance_id),
            duty_date,
            shift,
            &slots,
            None,
        ) {
            return Err(PersistenceError::SlotTaken {
                duty_date: date_str,
                shift: shift.as_str().to_string(),
                ambulance_id,
            });
        }

        let driver: Driver = queries::drivers::get_driver(conn, driver_id)?;
        if !driver.status.is_available() {
            return Err(PersistenceError::DriverUnavailable(driver_id));
        }

        if strict_driver_conflicts
            && !is_entity_available(
                true,
                RosterEntity::Driver(driver_id),
                duty_date,
                shift,
                &slots,
                None,
            )
        {
            return Err(PersistenceError::DriverSlotTaken {
                duty_date: date_str,
                shift: shift.as_str().to_string(),
                driver_id,
            });
        }

        let ambulance: Ambulance = queries::ambulances::get_ambulance(conn, ambulance_id)?;
        if !ambulance.status.is_available() {
            return Err(PersistenceError::AmbulanceUnavailable(ambulance_id));
        }

        let row: AssignmentRow = diesel::insert_into(assignments::table)
            .values(&NewAssignment {
                duty_date: date_str,
                shift: shift.as_str().to_string(),
                driver_id,
                ambulance_id,
                notes,
                status: AssignmentStatus::Scheduled.as_str().to_string(),
                created_at,
            })
            .get_result(conn)?;

        Assignment::try_from(row)
    })
}

/// Applies a partial update to an assignment.
///
/// A driver change re-validates the new driver's status, and under the
/// strict policy also re-checks the driver slot for the assignment's own
/// (date, shift) with the assignment itself excluded, so an edit never
/// conflicts with the row being edited.
///
/// # Errors
///
/// Returns `NotFound` if the assignment or a newly referenced driver does
/// not exist, `DriverUnavailable` / `DriverSlotTaken` per the checks above.
pub fn update_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
    new_driver_id: Option<i64>,
    new_status: Option<AssignmentStatus>,
    new_notes: Option<String>,
    strict_driver_conflicts: bool,
) -> Result<Assignment, PersistenceError> {
    info!(assignment_id, "Updating assignment");

    conn.transaction(|conn| {
        let existing: Assignment = queries::assignments::get_assignment(conn, assignment_id)?;

        if let Some(driver_id) = new_driver_id {
            let driver: Driver = queries::drivers::get_driver(conn, driver_id)?;
            if !driver.status.is_available() {
                return Err(PersistenceError::DriverUnavailable(driver_id));
            }

            if strict_driver_conflicts {
                let slots =
                    queries::assignments::slots_for(conn, existing.duty_date, existing.shift)?;
                if !is_entity_available(
                    true,
                    RosterEntity::Driver(driver_id),
                    existing.duty_date,
                    existing.shift,
                    &slots,
                    Some(assignment_id),
                ) {
                    return Err(PersistenceError::DriverSlotTaken {
                        duty_date: format_service_date(existing.duty_date)?,
                        shift: existing.shift.as_str().to_string(),
                        driver_id,
                    });
                }
            }
        }

        let changes = AssignmentChanges {
            driver_id: new_driver_id,
            notes: new_notes,
            status: new_status.map(|s| s.as_str().to_string()),
        };

        let row: AssignmentRow =
            diesel::update(assignments::table.filter(assignments::assignment_id.eq(assignment_id)))
                .set(&changes)
                .get_result(conn)?;

        Assignment::try_from(row)
    })
}

/// Hard-deletes an assignment. No cascading side effects.
///
/// # Errors
///
/// Returns `NotFound` if the assignment does not exist.
pub fn delete_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
) -> Result<(), PersistenceError> {
    info!(assignment_id, "Deleting assignment");

    let deleted: usize =
        diesel::delete(assignments::table.filter(assignments::assignment_id.eq(assignment_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Assignment {assignment_id}"
        )));
    }
    Ok(())
}
