// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard statistics.

use diesel::prelude::*;
use time::Date;
use tracing::debug;

use medfleet_domain::{
    AmbulanceStatus, BookingStatus, DriverStatus, ExpenseStatus, format_service_date,
};

use crate::diesel_schema::{ambulances, assignments, bookings, drivers, expenses};
use crate::error::PersistenceError;

/// Fleet-wide counters for the operations dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_drivers: i64,
    pub available_drivers: i64,
    pub total_ambulances: i64,
    pub available_ambulances: i64,
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub active_bookings: i64,
    pub todays_assignments: i64,
    pub pending_expenses: i64,
}

/// Computes the dashboard counters for `today`.
///
/// # Errors
///
/// Returns an error if any of the count queries fail.
pub fn dashboard_stats(
    conn: &mut SqliteConnection,
    today: Date,
) -> Result<DashboardStats, PersistenceError> {
    debug!(%today, "Computing dashboard stats");

    let total_drivers: i64 = drivers::table.count().get_result(conn)?;
    let available_drivers: i64 = drivers::table
        .filter(drivers::status.eq(DriverStatus::Available.as_str()))
        .count()
        .get_result(conn)?;

    let total_ambulances: i64 = ambulances::table.count().get_result(conn)?;
    let available_ambulances: i64 = ambulances::table
        .filter(ambulances::status.eq(AmbulanceStatus::Available.as_str()))
        .count()
        .get_result(conn)?;

    let total_bookings: i64 = bookings::table.count().get_result(conn)?;
    let pending_bookings: i64 = bookings::table
        .filter(bookings::status.eq(BookingStatus::Pending.as_str()))
        .count()
        .get_result(conn)?;
    let active_bookings: i64 = bookings::table
        .filter(bookings::status.eq_any([
            BookingStatus::Pending.as_str(),
            BookingStatus::Confirmed.as_str(),
            BookingStatus::Assigned.as_str(),
            BookingStatus::InProgress.as_str(),
            BookingStatus::Active.as_str(),
        ]))
        .count()
        .get_result(conn)?;

    let todays_assignments: i64 = assignments::table
        .filter(assignments::duty_date.eq(format_service_date(today)?))
        .count()
        .get_result(conn)?;

    let pending_expenses: i64 = expenses::table
        .filter(expenses::status.eq(ExpenseStatus::Pending.as_str()))
        .count()
        .get_result(conn)?;

    Ok(DashboardStats {
        total_drivers,
        available_drivers,
        total_ambulances,
        available_ambulances,
        total_bookings,
        pending_bookings,
        active_bookings,
        todays_assignments,
        pending_expenses,
    })
}
