// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin account bootstrap and the dashboard overview.

use time::OffsetDateTime;
use tracing::info;

use medfleet_persistence::Persistence;

use crate::convert::require_non_empty;
use crate::error::ApiError;
use crate::request_response::{AdminInfo, DashboardStatsResponse};

/// Registers an admin operator.
///
/// # Errors
///
/// Returns `conflict` if the email is already registered and
/// `validation_error` for empty fields or a too-short password.
pub fn create_admin(
    persistence: &mut Persistence,
    email: &str,
    password: &str,
    role: &str,
) -> Result<AdminInfo, ApiError> {
    require_non_empty("email", email)?;
    require_non_empty("role", role)?;
    if password.len() < 8 {
        return Err(ApiError::InvalidInput {
            field: String::from("password"),
            message: String::from("must be at least 8 characters"),
        });
    }

    let admin = persistence.create_admin(email, password, role, OffsetDateTime::now_utc())?;
    info!(admin_id = admin.admin_id, "Admin account created");

    Ok(AdminInfo {
        admin_id: admin.admin_id,
        email: admin.email,
        role: admin.role,
    })
}

/// Registers the first admin if none exists yet; used at server startup.
///
/// Returns true if an account was created.
///
/// # Errors
///
/// See [`create_admin`].
pub fn seed_admin_if_empty(
    persistence: &mut Persistence,
    email: &str,
    password: &str,
) -> Result<bool, ApiError> {
    if persistence.count_admins()? > 0 {
        return Ok(false);
    }
    create_admin(persistence, email, password, "admin")?;
    Ok(true)
}

/// Computes the dashboard counters for the current UTC day.
///
/// # Errors
///
/// Returns an error only if the store cannot be read.
pub fn dashboard_stats(
    persistence: &mut Persistence,
) -> Result<DashboardStatsResponse, ApiError> {
    dashboard_stats_at(persistence, OffsetDateTime::now_utc())
}

/// Computes the dashboard counters treating `now`'s date as today.
///
/// # Errors
///
/// Returns an error only if the store cannot be read.
pub fn dashboard_stats_at(
    persistence: &mut Persistence,
    now: OffsetDateTime,
) -> Result<DashboardStatsResponse, ApiError> {
    let stats = persistence.dashboard_stats(now.date())?;
    Ok(DashboardStatsResponse {
        total_drivers: stats.total_drivers,
        available_drivers: stats.available_drivers,
        total_ambulances: stats.total_ambulances,
        available_ambulances: stats.available_ambulances,
        total_bookings: stats.total_bookings,
        pending_bookings: stats.pending_bookings,
        active_bookings: stats.active_bookings,
        todays_assignments: stats.todays_assignments,
        pending_expenses: stats.pending_expenses,
    })
}
