// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the MedFleet dispatch backend.
//!
//! This crate owns the `SQLite` store: fleet records (drivers, ambulances,
//! location samples), the duty roster, bookings with their append-only event
//! log, phone verifications, admin accounts with sessions, and expenses.
//! It is built on Diesel.
//!
//! Operations that enforce a consistency rule (assignment slots, the booking
//! lifecycle) run their checks and writes inside a single transaction, and
//! the slot rule is additionally backed by a unique index, so concurrent
//! writers cannot slip a duplicate past the check.
//!
//! Tests use a shared in-memory database per `Persistence` instance; an
//! atomic counter gives each instance a unique name so tests stay isolated
//! without time-based naming.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, Duration, OffsetDateTime};

use medfleet_audit::BookingEvent;
use medfleet_domain::{
    Ambulance, AmbulanceStatus, Assignment, AssignmentSlot, AssignmentStatus, Booking,
    BookingStatus, Driver, DriverStatus, Expense, ExpenseStatus, LocationSample, Shift,
    format_timestamp,
};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod schema;

#[cfg(test)]
mod tests;

pub use data_models::{
    AdminData, AmbulanceChanges, BookingChanges, DriverChanges, ExpenseChanges, NewAmbulance,
    NewBooking, NewDriver, NewExpense, OtpRecord, SessionData,
};
pub use error::PersistenceError;
pub use queries::stats::DashboardStats;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so tests
/// are isolated without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Formats a timestamp for storage.
pub(crate) fn iso(now: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(format_timestamp(now)?)
}

fn open_connection(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let mut conn = SqliteConnection::establish(database_url)?;
    conn.batch_execute("PRAGMA busy_timeout = 5000;")
        .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;
    schema::initialize_schema(&mut conn)?;
    Ok(conn)
}

/// Persistence adapter owning one `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter backed by an in-memory database.
    ///
    /// Each call receives its own database via a unique shared-cache name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url = format!("file:medfleet_mem_{db_id}?mode=memory&cache=shared");
        Ok(Self {
            conn: open_connection(&url)?,
        })
    }

    /// Creates a persistence adapter backed by a database file.
    ///
    /// WAL mode is enabled for better read concurrency.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn = open_connection(path_str)?;
        conn.batch_execute("PRAGMA journal_mode = WAL;")
            .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Drivers
    // ========================================================================

    /// Creates a driver.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the phone number is already registered.
    pub fn create_driver(&mut self, new: &NewDriver) -> Result<Driver, PersistenceError> {
        mutations::drivers::create_driver(&mut self.conn, new)
    }

    /// Applies a partial update to a driver.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the driver does not exist.
    pub fn update_driver(
        &mut self,
        driver_id: i64,
        changes: &DriverChanges,
    ) -> Result<Driver, PersistenceError> {
        mutations::drivers::update_driver(&mut self.conn, driver_id, changes)
    }

    /// Deletes a driver.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the driver does not exist.
    pub fn delete_driver(&mut self, driver_id: i64) -> Result<(), PersistenceError> {
        mutations::drivers::delete_driver(&mut self.conn, driver_id)
    }

    /// Fetches a driver by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the driver does not exist.
    pub fn get_driver(&mut self, driver_id: i64) -> Result<Driver, PersistenceError> {
        queries::drivers::get_driver(&mut self.conn, driver_id)
    }

    /// Fetches a driver by phone number, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_driver_by_phone(
        &mut self,
        phone: &str,
    ) -> Result<Option<Driver>, PersistenceError> {
        queries::drivers::get_driver_by_phone(&mut self.conn, phone)
    }

    /// Lists drivers, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_drivers(
        &mut self,
        status: Option<DriverStatus>,
    ) -> Result<Vec<Driver>, PersistenceError> {
        queries::drivers::list_drivers(&mut self.conn, status)
    }

    // ========================================================================
    // Ambulances & locations
    // ========================================================================

    /// Creates an ambulance.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the vehicle number is already registered.
    pub fn create_ambulance(&mut self, new: &NewAmbulance) -> Result<Ambulance, PersistenceError> {
        mutations::ambulances::create_ambulance(&mut self.conn, new)
    }

    /// Applies a partial update to an ambulance.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ambulance does not exist.
    pub fn update_ambulance(
        &mut self,
        ambulance_id: i64,
        changes: &AmbulanceChanges,
    ) -> Result<Ambulance, PersistenceError> {
        mutations::ambulances::update_ambulance(&mut self.conn, ambulance_id, changes)
    }

    /// Deletes an ambulance.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ambulance does not exist.
    pub fn delete_ambulance(&mut self, ambulance_id: i64) -> Result<(), PersistenceError> {
        mutations::ambulances::delete_ambulance(&mut self.conn, ambulance_id)
    }

    /// Fetches an ambulance by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ambulance does not exist.
    pub fn get_ambulance(&mut self, ambulance_id: i64) -> Result<Ambulance, PersistenceError> {
        queries::ambulances::get_ambulance(&mut self.conn, ambulance_id)
    }

    /// Lists ambulances, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_ambulances(
        &mut self,
        status: Option<AmbulanceStatus>,
    ) -> Result<Vec<Ambulance>, PersistenceError> {
        queries::ambulances::list_ambulances(&mut self.conn, status)
    }

    /// Lists ambulances that have reported a position at least once.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn ambulances_with_position(&mut self) -> Result<Vec<Ambulance>, PersistenceError> {
        queries::ambulances::ambulances_with_position(&mut self.conn)
    }

    /// Records a location sample and updates the vehicle's current position
    /// atomically.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ambulance does not exist.
    #[allow(clippy::too_many_arguments)]
    pub fn record_location(
        &mut self,
        ambulance_id: i64,
        latitude: f64,
        longitude: f64,
        speed: Option<f64>,
        heading: Option<f64>,
        accuracy: Option<f64>,
        now: OffsetDateTime,
    ) -> Result<(Ambulance, LocationSample), PersistenceError> {
        mutations::ambulances::record_location(
            &mut self.conn,
            ambulance_id,
            latitude,
            longitude,
            speed,
            heading,
            accuracy,
            now,
        )
    }

    /// Returns the most recent location samples for an ambulance, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ambulance does not exist.
    pub fn location_history(
        &mut self,
        ambulance_id: i64,
        limit: i64,
    ) -> Result<Vec<LocationSample>, PersistenceError> {
        queries::ambulances::location_history(&mut self.conn, ambulance_id, limit)
    }

    // ========================================================================
    // Assignments
    // ========================================================================

    /// Creates a roster assignment after the availability checks pass.
    ///
    /// # Errors
    ///
    /// See [`mutations::assignments::create_assignment`].
    #[allow(clippy::too_many_arguments)]
    pub fn create_assignment(
        &mut self,
        duty_date: Date,
        shift: Shift,
        driver_id: i64,
        ambulance_id: i64,
        notes: Option<String>,
        strict_driver_conflicts: bool,
        now: OffsetDateTime,
    ) -> Result<Assignment, PersistenceError> {
        mutations::assignments::create_assignment(
            &mut self.conn,
            duty_date,
            shift,
            driver_id,
            ambulance_id,
            notes,
            strict_driver_conflicts,
            now,
        )
    }

    /// Applies a partial update to an assignment.
    ///
    /// # Errors
    ///
    /// See [`mutations::assignments::update_assignment`].
    pub fn update_assignment(
        &mut self,
        assignment_id: i64,
        new_driver_id: Option<i64>,
        new_status: Option<AssignmentStatus>,
        new_notes: Option<String>,
        strict_driver_conflicts: bool,
    ) -> Result<Assignment, PersistenceError> {
        mutations::assignments::update_assignment(
            &mut self.conn,
            assignment_id,
            new_driver_id,
            new_status,
            new_notes,
            strict_driver_conflicts,
        )
    }

    /// Deletes an assignment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the assignment does not exist.
    pub fn delete_assignment(&mut self, assignment_id: i64) -> Result<(), PersistenceError> {
        mutations::assignments::delete_assignment(&mut self.conn, assignment_id)
    }

    /// Fetches an assignment by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the assignment does not exist.
    pub fn get_assignment(&mut self, assignment_id: i64) -> Result<Assignment, PersistenceError> {
        queries::assignments::get_assignment(&mut self.conn, assignment_id)
    }

    /// Lists assignments, optionally restricted to one date, ordered by date
    /// then shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assignments(
        &mut self,
        duty_date: Option<Date>,
    ) -> Result<Vec<Assignment>, PersistenceError> {
        queries::assignments::list_assignments(&mut self.conn, duty_date)
    }

    /// Lists assignments with optional date-range and ambulance filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assignments_filtered(
        &mut self,
        start: Option<Date>,
        end: Option<Date>,
        ambulance_id: Option<i64>,
    ) -> Result<Vec<Assignment>, PersistenceError> {
        queries::assignments::list_assignments_filtered(&mut self.conn, start, end, ambulance_id)
    }

    /// Returns the occupancy slots for one date and shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn slots_for(
        &mut self,
        duty_date: Date,
        shift: Shift,
    ) -> Result<Vec<AssignmentSlot>, PersistenceError> {
        queries::assignments::slots_for(&mut self.conn, duty_date, shift)
    }

    /// Returns the occupancy slots for every shift in an inclusive date
    /// range.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn slots_between(
        &mut self,
        start: Date,
        end: Date,
    ) -> Result<Vec<AssignmentSlot>, PersistenceError> {
        queries::assignments::slots_between(&mut self.conn, start, end)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Creates a booking and logs its creation event atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or the event append fails.
    pub fn create_booking(&mut self, new: &NewBooking) -> Result<Booking, PersistenceError> {
        mutations::bookings::create_booking(&mut self.conn, new)
    }

    /// Applies a partial update to a booking, logging the update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the booking does not exist.
    pub fn update_booking(
        &mut self,
        booking_id: i64,
        changes: &BookingChanges,
        updated_by: String,
        now: OffsetDateTime,
    ) -> Result<Booking, PersistenceError> {
        mutations::bookings::update_booking(&mut self.conn, booking_id, changes, updated_by, now)
    }

    /// Moves a booking to the requested status and logs the transition.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the booking does not exist.
    pub fn change_booking_status(
        &mut self,
        booking_id: i64,
        requested: BookingStatus,
        changed_by: String,
        now: OffsetDateTime,
    ) -> Result<Booking, PersistenceError> {
        mutations::bookings::change_booking_status(
            &mut self.conn,
            booking_id,
            requested,
            changed_by,
            now,
        )
    }

    /// Assigns an ambulance and driver to a booking.
    ///
    /// # Errors
    ///
    /// See [`mutations::bookings::assign_booking`].
    pub fn assign_booking(
        &mut self,
        booking_id: i64,
        ambulance_id: i64,
        driver_id: i64,
        assigned_by: String,
        now: OffsetDateTime,
    ) -> Result<Booking, PersistenceError> {
        mutations::bookings::assign_booking(
            &mut self.conn,
            booking_id,
            ambulance_id,
            driver_id,
            assigned_by,
            now,
        )
    }

    /// Deletes a booking along with its event log.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the booking does not exist.
    pub fn delete_booking(&mut self, booking_id: i64) -> Result<(), PersistenceError> {
        mutations::bookings::delete_booking(&mut self.conn, booking_id)
    }

    /// Fetches a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the booking does not exist.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Booking, PersistenceError> {
        queries::bookings::get_booking(&mut self.conn, booking_id)
    }

    /// Lists bookings, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings(
        &mut self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings(&mut self.conn, status)
    }

    /// Lists bookings whose ride is currently underway.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn active_rides(&mut self) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::active_rides(&mut self.conn)
    }

    /// Returns a booking's event log in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored event cannot be
    /// decoded.
    pub fn booking_events(
        &mut self,
        booking_id: i64,
    ) -> Result<Vec<BookingEvent>, PersistenceError> {
        queries::bookings::events_for(&mut self.conn, booking_id)
    }

    /// Counts the events logged for a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_booking_events(&mut self, booking_id: i64) -> Result<i64, PersistenceError> {
        queries::bookings::count_events(&mut self.conn, booking_id)
    }

    // ========================================================================
    // Phone verification
    // ========================================================================

    /// Issues a verification code, replacing any prior record for the phone.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn issue_otp_code(
        &mut self,
        phone: &str,
        code: &str,
        now: OffsetDateTime,
    ) -> Result<OtpRecord, PersistenceError> {
        mutations::otp::issue_code(&mut self.conn, phone, code, now)
    }

    /// Confirms a verification code.
    ///
    /// # Errors
    ///
    /// See [`mutations::otp::confirm_code`].
    pub fn confirm_otp_code(
        &mut self,
        phone: &str,
        code: &str,
        now: OffsetDateTime,
    ) -> Result<OtpRecord, PersistenceError> {
        mutations::otp::confirm_code(&mut self.conn, phone, code, now)
    }

    /// Fetches the verification record for a phone, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn otp_record(&mut self, phone: &str) -> Result<Option<OtpRecord>, PersistenceError> {
        queries::otp::get_record(&mut self.conn, phone)
    }

    /// Returns true if the phone has a verification confirmed within the
    /// last twenty-four hours.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn is_phone_verified(
        &mut self,
        phone: &str,
        now: OffsetDateTime,
    ) -> Result<bool, PersistenceError> {
        queries::otp::is_phone_verified(&mut self.conn, phone, now)
    }

    // ========================================================================
    // Admins & sessions
    // ========================================================================

    /// Creates an admin operator with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the email is already registered.
    pub fn create_admin(
        &mut self,
        email: &str,
        password: &str,
        role: &str,
        now: OffsetDateTime,
    ) -> Result<AdminData, PersistenceError> {
        mutations::admins::create_admin(&mut self.conn, email, password, role, now)
    }

    /// Verifies a login attempt and records the login time on success.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the email is unknown or the
    /// password does not match.
    pub fn verify_credentials(
        &mut self,
        email: &str,
        password: &str,
        now: OffsetDateTime,
    ) -> Result<AdminData, PersistenceError> {
        mutations::admins::verify_credentials(&mut self.conn, email, password, now)
    }

    /// Creates a session for an admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        admin_id: i64,
        now: OffsetDateTime,
        ttl: Duration,
    ) -> Result<SessionData, PersistenceError> {
        mutations::admins::create_session(&mut self.conn, session_token, admin_id, now, ttl)
    }

    /// Records activity on a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn touch_session(
        &mut self,
        session_id: i64,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::admins::touch_session(&mut self.conn, session_id, now)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::admins::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all sessions whose expiry has passed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<usize, PersistenceError> {
        mutations::admins::delete_expired_sessions(&mut self.conn, now)
    }

    /// Fetches an admin by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the admin does not exist.
    pub fn get_admin(&mut self, admin_id: i64) -> Result<AdminData, PersistenceError> {
        queries::admins::get_admin(&mut self.conn, admin_id)
    }

    /// Counts registered admins.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_admins(&mut self) -> Result<i64, PersistenceError> {
        queries::admins::count_admins(&mut self.conn)
    }

    /// Resolves a bearer token to a live session.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` or `SessionExpired`.
    pub fn get_live_session(
        &mut self,
        session_token: &str,
        now: OffsetDateTime,
    ) -> Result<SessionData, PersistenceError> {
        queries::admins::get_live_session(&mut self.conn, session_token, now)
    }

    // ========================================================================
    // Expenses
    // ========================================================================

    /// Creates an expense.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_expense(&mut self, new: &NewExpense) -> Result<Expense, PersistenceError> {
        mutations::expenses::create_expense(&mut self.conn, new)
    }

    /// Applies a partial update to an expense, stamping approval metadata on
    /// a decision.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the expense does not exist.
    pub fn update_expense(
        &mut self,
        expense_id: i64,
        changes: ExpenseChanges,
        acting_admin_id: i64,
        now: OffsetDateTime,
    ) -> Result<Expense, PersistenceError> {
        mutations::expenses::update_expense(&mut self.conn, expense_id, changes, acting_admin_id, now)
    }

    /// Deletes an expense.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the expense does not exist.
    pub fn delete_expense(&mut self, expense_id: i64) -> Result<(), PersistenceError> {
        mutations::expenses::delete_expense(&mut self.conn, expense_id)
    }

    /// Fetches an expense by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the expense does not exist.
    pub fn get_expense(&mut self, expense_id: i64) -> Result<Expense, PersistenceError> {
        queries::expenses::get_expense(&mut self.conn, expense_id)
    }

    /// Lists expenses with optional filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_expenses(
        &mut self,
        status: Option<ExpenseStatus>,
        category: Option<&str>,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<Vec<Expense>, PersistenceError> {
        queries::expenses::list_expenses(&mut self.conn, status, category, from, to)
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    /// Computes the dashboard counters for `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the count queries fail.
    pub fn dashboard_stats(&mut self, today: Date) -> Result<DashboardStats, PersistenceError> {
        queries::stats::dashboard_stats(&mut self.conn, today)
    }
}
