// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonical domain entity types.
//!
//! These are the structs the persistence layer returns and the service layer
//! operates on. Timestamps are carried as ISO 8601 strings, matching how the
//! store persists them; calendar dates are `time::Date`.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::status::{AmbulanceStatus, AssignmentStatus, BookingStatus, DriverStatus, ExpenseStatus, Shift};

/// A rostered driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: i64,
    pub name: String,
    /// Unique contact number; the store enforces uniqueness.
    pub phone: String,
    pub email: Option<String>,
    pub license_no: Option<String>,
    pub address: Option<String>,
    pub national_id: Option<String>,
    pub status: DriverStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// A vehicle in the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ambulance {
    pub ambulance_id: i64,
    pub model_name: String,
    pub vehicle_type: String,
    /// Unique registration plate; the store enforces uniqueness.
    pub vehicle_no: String,
    pub equipment_details: Option<String>,
    pub status: AmbulanceStatus,
    pub current_latitude: Option<f64>,
    pub current_longitude: Option<f64>,
    pub last_location_update: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A duty roster slot binding one driver and one vehicle to a (date, shift).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub assignment_id: i64,
    pub duty_date: Date,
    pub shift: Shift,
    pub driver_id: i64,
    pub ambulance_id: i64,
    pub notes: Option<String>,
    pub status: AssignmentStatus,
    pub created_at: String,
}

/// A patient transport request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: i64,
    pub patient_name: String,
    pub phone: String,
    pub phone_verified: bool,
    pub from_address: String,
    pub from_latitude: Option<f64>,
    pub from_longitude: Option<f64>,
    pub to_address: String,
    pub to_latitude: Option<f64>,
    pub to_longitude: Option<f64>,
    pub from_date: Date,
    /// Present only for return trips.
    pub to_date: Option<Date>,
    pub pickup_time: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub assigned_ambulance_id: Option<i64>,
    pub assigned_driver_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// An append-only location time-series point for an ambulance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub location_id: i64,
    pub ambulance_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub accuracy: Option<f64>,
    pub recorded_at: String,
}

/// An operational expense ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub expense_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    pub expense_date: Date,
    pub vendor: Option<String>,
    pub receipt_url: Option<String>,
    pub status: ExpenseStatus,
    pub created_by: i64,
    pub approved_by: Option<i64>,
    pub approved_at: Option<String>,
    pub created_at: String,
}
