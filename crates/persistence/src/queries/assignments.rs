// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment queries.

use diesel::prelude::*;
use time::Date;
use tracing::debug;

use medfleet_domain::{Assignment, AssignmentSlot, Shift, format_service_date};

use crate::data_models::AssignmentRow;
use crate::diesel_schema::assignments;
use crate::error::PersistenceError;

fn slot_from_row(row: AssignmentRow) -> Result<AssignmentSlot, PersistenceError> {
    let assignment = Assignment::try_from(row)?;
    Ok(AssignmentSlot {
        assignment_id: assignment.assignment_id,
        date: assignment.duty_date,
        shift: assignment.shift,
        driver_id: assignment.driver_id,
        ambulance_id: assignment.ambulance_id,
    })
}

/// Fetches an assignment by ID.
///
/// # Errors
///
/// Returns `NotFound` if the assignment does not exist.
pub fn get_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
) -> Result<Assignment, PersistenceError> {
    let row: AssignmentRow = assignments::table
        .filter(assignments::assignment_id.eq(assignment_id))
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Assignment {assignment_id}"))
            }
            other => other.into(),
        })?;

    Assignment::try_from(row)
}

/// Returns the occupancy slots for one date and shift.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be mapped.
pub fn slots_for(
    conn: &mut SqliteConnection,
    duty_date: Date,
    shift: Shift,
) -> Result<Vec<AssignmentSlot>, PersistenceError> {
    let rows: Vec<AssignmentRow> = assignments::table
        .filter(assignments::duty_date.eq(format_service_date(duty_date)?))
        .filter(assignments::shift.eq(shift.as_str()))
        .load(conn)?;

    rows.into_iter().map(slot_from_row).collect()
}

/// Returns the occupancy slots for every shift in an inclusive date range.
///
/// Dates are stored as ISO text, so the range filter is a plain string
/// comparison.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be mapped.
pub fn slots_between(
    conn: &mut SqliteConnection,
    start: Date,
    end: Date,
) -> Result<Vec<AssignmentSlot>, PersistenceError> {
    let rows: Vec<AssignmentRow> = assignments::table
        .filter(assignments::duty_date.ge(format_service_date(start)?))
        .filter(assignments::duty_date.le(format_service_date(end)?))
        .load(conn)?;

    rows.into_iter().map(slot_from_row).collect()
}

/// Lists assignments, optionally restricted to one date, ordered by date
/// then shift.
///
/// The shift ordering (morning before afternoon before night) is not the
/// alphabetical one, so the sort happens after loading.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be mapped.
pub fn list_assignments(
    conn: &mut SqliteConnection,
    duty_date: Option<Date>,
) -> Result<Vec<Assignment>, PersistenceError> {
    debug!(?duty_date, "Listing assignments");

    let mut query = assignments::table.into_boxed();
    if let Some(date) = duty_date {
        query = query.filter(assignments::duty_date.eq(format_service_date(date)?));
    }

    let rows: Vec<AssignmentRow> = query.load(conn)?;
    sorted_assignments(rows)
}

/// Lists assignments with optional date-range and ambulance filters, ordered
/// by date then shift.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be mapped.
pub fn list_assignments_filtered(
    conn: &mut SqliteConnection,
    start: Option<Date>,
    end: Option<Date>,
    ambulance_id: Option<i64>,
) -> Result<Vec<Assignment>, PersistenceError> {
    debug!(?start, ?end, ?ambulance_id, "Listing assignments (filtered)");

    let mut query = assignments::table.into_boxed();
    if let Some(start) = start {
        query = query.filter(assignments::duty_date.ge(format_service_date(start)?));
    }
    if let Some(end) = end {
        query = query.filter(assignments::duty_date.le(format_service_date(end)?));
    }
    if let Some(ambulance_id) = ambulance_id {
        query = query.filter(assignments::ambulance_id.eq(ambulance_id));
    }

    let rows: Vec<AssignmentRow> = query.load(conn)?;
    sorted_assignments(rows)
}

fn sorted_assignments(rows: Vec<AssignmentRow>) -> Result<Vec<Assignment>, PersistenceError> {
    let mut out: Vec<Assignment> = rows
        .into_iter()
        .map(Assignment::try_from)
        .collect::<Result<_, _>>()?;

    out.sort_by(|a, b| {
        a.duty_date
            .cmp(&b.duty_date)
            .then(a.shift.cmp(&b.shift))
            .then(a.assignment_id.cmp(&b.assignment_id))
    });
    Ok(out)
}
