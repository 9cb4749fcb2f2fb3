// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::connection::SimpleConnection;
use diesel::sqlite::SqliteConnection;
use tracing::info;

use crate::error::PersistenceError;

/// Initializes the database schema.
///
/// The DDL is idempotent, so calling this against an already-initialized
/// database is a no-op. The one-ambulance-per-date-and-shift rule is backed
/// by the composite unique index on `assignments`; a lost check-then-create
/// race therefore surfaces as a constraint violation rather than a duplicate
/// row. The driver axis is deliberately left without a unique index so the
/// lenient conflict policy stays reachable.
///
/// # Arguments
///
/// * `conn` - The database connection to initialize
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    conn.batch_execute(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS admins (
            admin_id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE COLLATE NOCASE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'admin',
            created_at TEXT NOT NULL,
            last_login_at TEXT
        );

        CREATE TABLE IF NOT EXISTS sessions (
            session_id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_token TEXT NOT NULL UNIQUE,
            admin_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            last_activity_at TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            FOREIGN KEY(admin_id) REFERENCES admins(admin_id)
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_token
            ON sessions(session_token);

        CREATE TABLE IF NOT EXISTS drivers (
            driver_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone TEXT NOT NULL UNIQUE,
            email TEXT,
            license_no TEXT,
            address TEXT,
            national_id TEXT,
            status TEXT NOT NULL DEFAULT 'available'
                CHECK(status IN ('available', 'busy', 'offline')),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS ambulances (
            ambulance_id INTEGER PRIMARY KEY AUTOINCREMENT,
            model_name TEXT NOT NULL,
            vehicle_type TEXT NOT NULL,
            vehicle_no TEXT NOT NULL UNIQUE,
            equipment_details TEXT,
            status TEXT NOT NULL DEFAULT 'available'
                CHECK(status IN ('available', 'in_use', 'maintenance',
                                 'out_of_service', 'on_duty')),
            current_latitude REAL,
            current_longitude REAL,
            last_location_update TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS ambulance_locations (
            location_id INTEGER PRIMARY KEY AUTOINCREMENT,
            ambulance_id INTEGER NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            speed REAL,
            heading REAL,
            accuracy REAL,
            recorded_at TEXT NOT NULL,
            FOREIGN KEY(ambulance_id) REFERENCES ambulances(ambulance_id)
        );

        CREATE INDEX IF NOT EXISTS idx_ambulance_locations_by_vehicle
            ON ambulance_locations(ambulance_id, location_id);

        CREATE TABLE IF NOT EXISTS assignments (
            assignment_id INTEGER PRIMARY KEY AUTOINCREMENT,
            duty_date TEXT NOT NULL,
            shift TEXT NOT NULL
                CHECK(shift IN ('morning', 'afternoon', 'night')),
            driver_id INTEGER NOT NULL,
            ambulance_id INTEGER NOT NULL,
            notes TEXT,
            status TEXT NOT NULL DEFAULT 'scheduled'
                CHECK(status IN ('scheduled', 'completed', 'cancelled')),
            created_at TEXT NOT NULL,
            UNIQUE(duty_date, shift, ambulance_id),
            FOREIGN KEY(driver_id) REFERENCES drivers(driver_id),
            FOREIGN KEY(ambulance_id) REFERENCES ambulances(ambulance_id)
        );

        CREATE INDEX IF NOT EXISTS idx_assignments_by_date
            ON assignments(duty_date, shift);

        CREATE TABLE IF NOT EXISTS bookings (
            booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
            patient_name TEXT NOT NULL,
            phone TEXT NOT NULL,
            phone_verified INTEGER NOT NULL DEFAULT 0
                CHECK(phone_verified IN (0, 1)),
            from_address TEXT NOT NULL,
            from_latitude REAL,
            from_longitude REAL,
            to_address TEXT NOT NULL,
            to_latitude REAL,
            to_longitude REAL,
            from_date TEXT NOT NULL,
            to_date TEXT,
            pickup_time TEXT NOT NULL,
            notes TEXT,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK(status IN ('pending', 'confirmed', 'assigned',
                                 'in_progress', 'completed', 'cancelled',
                                 'active')),
            assigned_ambulance_id INTEGER,
            assigned_driver_id INTEGER,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(assigned_ambulance_id) REFERENCES ambulances(ambulance_id),
            FOREIGN KEY(assigned_driver_id) REFERENCES drivers(driver_id)
        );

        CREATE TABLE IF NOT EXISTS booking_events (
            event_id INTEGER PRIMARY KEY AUTOINCREMENT,
            booking_id INTEGER NOT NULL,
            event_type TEXT NOT NULL,
            payload_json TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY(booking_id) REFERENCES bookings(booking_id)
        );

        CREATE INDEX IF NOT EXISTS idx_booking_events_by_booking
            ON booking_events(booking_id, event_id);

        CREATE TABLE IF NOT EXISTS otp_verifications (
            phone TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            verified INTEGER NOT NULL DEFAULT 0 CHECK(verified IN (0, 1)),
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS expenses (
            expense_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            category TEXT NOT NULL,
            amount REAL NOT NULL,
            currency TEXT NOT NULL DEFAULT 'INR',
            expense_date TEXT NOT NULL,
            vendor TEXT,
            receipt_url TEXT,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK(status IN ('pending', 'approved', 'rejected')),
            created_by INTEGER NOT NULL,
            approved_by INTEGER,
            approved_at TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY(created_by) REFERENCES admins(admin_id),
            FOREIGN KEY(approved_by) REFERENCES admins(admin_id)
        );

        CREATE INDEX IF NOT EXISTS idx_expenses_by_date
            ON expenses(expense_date);
        ",
    )
    .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

    Ok(())
}
