// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row models and write models for the entity store.
//!
//! Row structs mirror table column order exactly and convert into the
//! canonical domain types; `New*` structs are the insert shapes and
//! `*Changes` structs are partial updates (a `None` field is left untouched).

use diesel::prelude::*;
use std::str::FromStr;
use time::Date;

use medfleet_audit::{BookingEvent, EventPayload};
use medfleet_domain::{
    Ambulance, AmbulanceStatus, Assignment, AssignmentStatus, Booking, BookingStatus, Driver,
    DriverStatus, Expense, ExpenseStatus, LocationSample, Shift, parse_service_date,
};

use crate::diesel_schema::{
    admins, ambulance_locations, ambulances, assignments, booking_events, bookings, drivers,
    expenses, otp_verifications, sessions,
};
use crate::error::PersistenceError;

/// Admin operator data as stored.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct AdminData {
    pub admin_id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// Session data as stored.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub admin_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// OTP verification record as stored.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct OtpRecord {
    pub phone: String,
    pub code: String,
    pub expires_at: String,
    pub verified: i32,
    pub updated_at: String,
}

impl OtpRecord {
    /// Returns true if the record has been confirmed.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.verified != 0
    }
}

#[derive(Debug, Clone, Queryable)]
pub struct DriverRow {
    pub driver_id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub license_no: Option<String>,
    pub address: Option<String>,
    pub national_id: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<DriverRow> for Driver {
    type Error = PersistenceError;

    fn try_from(row: DriverRow) -> Result<Self, Self::Error> {
        Ok(Self {
            driver_id: row.driver_id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            license_no: row.license_no,
            address: row.address,
            national_id: row.national_id,
            status: DriverStatus::from_str(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert shape for a driver.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = drivers)]
pub struct NewDriver {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub license_no: Option<String>,
    pub address: Option<String>,
    pub national_id: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial update for a driver.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = drivers)]
pub struct DriverChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub license_no: Option<String>,
    pub address: Option<String>,
    pub national_id: Option<String>,
    pub status: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Queryable)]
pub struct AmbulanceRow {
    pub ambulance_id: i64,
    pub model_name: String,
    pub vehicle_type: String,
    pub vehicle_no: String,
    pub equipment_details: Option<String>,
    pub status: String,
    pub current_latitude: Option<f64>,
    pub current_longitude: Option<f64>,
    pub last_location_update: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<AmbulanceRow> for Ambulance {
    type Error = PersistenceError;

    fn try_from(row: AmbulanceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            ambulance_id: row.ambulance_id,
            model_name: row.model_name,
            vehicle_type: row.vehicle_type,
            vehicle_no: row.vehicle_no,
            equipment_details: row.equipment_details,
            status: AmbulanceStatus::from_str(&row.status)?,
            current_latitude: row.current_latitude,
            current_longitude: row.current_longitude,
            last_location_update: row.last_location_update,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert shape for an ambulance.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ambulances)]
pub struct NewAmbulance {
    pub model_name: String,
    pub vehicle_type: String,
    pub vehicle_no: String,
    pub equipment_details: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial update for an ambulance.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = ambulances)]
pub struct AmbulanceChanges {
    pub model_name: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_no: Option<String>,
    pub equipment_details: Option<String>,
    pub status: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Queryable)]
pub struct LocationSampleRow {
    pub location_id: i64,
    pub ambulance_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub accuracy: Option<f64>,
    pub recorded_at: String,
}

impl From<LocationSampleRow> for LocationSample {
    fn from(row: LocationSampleRow) -> Self {
        Self {
            location_id: row.location_id,
            ambulance_id: row.ambulance_id,
            latitude: row.latitude,
            longitude: row.longitude,
            speed: row.speed,
            heading: row.heading,
            accuracy: row.accuracy,
            recorded_at: row.recorded_at,
        }
    }
}

/// Insert shape for a location sample.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ambulance_locations)]
pub struct NewLocationSample {
    pub ambulance_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub accuracy: Option<f64>,
    pub recorded_at: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub duty_date: String,
    pub shift: String,
    pub driver_id: i64,
    pub ambulance_id: i64,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = PersistenceError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            assignment_id: row.assignment_id,
            duty_date: parse_service_date(&row.duty_date)?,
            shift: Shift::from_str(&row.shift)?,
            driver_id: row.driver_id,
            ambulance_id: row.ambulance_id,
            notes: row.notes,
            status: AssignmentStatus::from_str(&row.status)?,
            created_at: row.created_at,
        })
    }
}

/// Insert shape for an assignment.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assignments)]
pub struct NewAssignment {
    pub duty_date: String,
    pub shift: String,
    pub driver_id: i64,
    pub ambulance_id: i64,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
}

/// Partial update for an assignment.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = assignments)]
pub struct AssignmentChanges {
    pub driver_id: Option<i64>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Queryable)]
pub struct BookingRow {
    pub booking_id: i64,
    pub patient_name: String,
    pub phone: String,
    pub phone_verified: i32,
    pub from_address: String,
    pub from_latitude: Option<f64>,
    pub from_longitude: Option<f64>,
    pub to_address: String,
    pub to_latitude: Option<f64>,
    pub to_longitude: Option<f64>,
    pub from_date: String,
    pub to_date: Option<String>,
    pub pickup_time: String,
    pub notes: Option<String>,
    pub status: String,
    pub assigned_ambulance_id: Option<i64>,
    pub assigned_driver_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = PersistenceError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let to_date: Option<Date> = match row.to_date {
            Some(ref s) => Some(parse_service_date(s)?),
            None => None,
        };
        Ok(Self {
            booking_id: row.booking_id,
            patient_name: row.patient_name,
            phone: row.phone,
            phone_verified: row.phone_verified != 0,
            from_address: row.from_address,
            from_latitude: row.from_latitude,
            from_longitude: row.from_longitude,
            to_address: row.to_address,
            to_latitude: row.to_latitude,
            to_longitude: row.to_longitude,
            from_date: parse_service_date(&row.from_date)?,
            to_date,
            pickup_time: row.pickup_time,
            notes: row.notes,
            status: BookingStatus::from_str(&row.status)?,
            assigned_ambulance_id: row.assigned_ambulance_id,
            assigned_driver_id: row.assigned_driver_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert shape for a booking.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBooking {
    pub patient_name: String,
    pub phone: String,
    pub phone_verified: i32,
    pub from_address: String,
    pub from_latitude: Option<f64>,
    pub from_longitude: Option<f64>,
    pub to_address: String,
    pub to_latitude: Option<f64>,
    pub to_longitude: Option<f64>,
    pub from_date: String,
    pub to_date: Option<String>,
    pub pickup_time: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial update for a booking's patient/address/schedule fields.
///
/// Status and assignment columns are deliberately absent; those mutate only
/// through the dedicated lifecycle operations.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = bookings)]
pub struct BookingChanges {
    pub patient_name: Option<String>,
    pub phone: Option<String>,
    pub from_address: Option<String>,
    pub from_latitude: Option<f64>,
    pub from_longitude: Option<f64>,
    pub to_address: Option<String>,
    pub to_latitude: Option<f64>,
    pub to_longitude: Option<f64>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub pickup_time: Option<String>,
    pub notes: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Queryable)]
pub struct BookingEventRow {
    pub event_id: i64,
    pub booking_id: i64,
    pub event_type: String,
    pub payload_json: String,
    pub created_at: String,
}

impl TryFrom<BookingEventRow> for BookingEvent {
    type Error = PersistenceError;

    fn try_from(row: BookingEventRow) -> Result<Self, Self::Error> {
        let payload: EventPayload = EventPayload::from_json(&row.payload_json)?;
        if payload.event_type() != row.event_type {
            return Err(PersistenceError::InvalidRecord(format!(
                "event {} type tag '{}' does not match payload '{}'",
                row.event_id,
                row.event_type,
                payload.event_type()
            )));
        }
        Ok(Self {
            event_id: row.event_id,
            booking_id: row.booking_id,
            payload,
            created_at: row.created_at,
        })
    }
}

/// Insert shape for a booking event.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = booking_events)]
pub struct NewBookingEvent {
    pub booking_id: i64,
    pub event_type: String,
    pub payload_json: String,
    pub created_at: String,
}

/// Insert shape for an OTP record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = otp_verifications)]
pub struct NewOtpRecord {
    pub phone: String,
    pub code: String,
    pub expires_at: String,
    pub verified: i32,
    pub updated_at: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct ExpenseRow {
    pub expense_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    pub expense_date: String,
    pub vendor: Option<String>,
    pub receipt_url: Option<String>,
    pub status: String,
    pub created_by: i64,
    pub approved_by: Option<i64>,
    pub approved_at: Option<String>,
    pub created_at: String,
}

impl TryFrom<ExpenseRow> for Expense {
    type Error = PersistenceError;

    fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
        Ok(Self {
            expense_id: row.expense_id,
            title: row.title,
            description: row.description,
            category: row.category,
            amount: row.amount,
            currency: row.currency,
            expense_date: parse_service_date(&row.expense_date)?,
            vendor: row.vendor,
            receipt_url: row.receipt_url,
            status: ExpenseStatus::from_str(&row.status)?,
            created_by: row.created_by,
            approved_by: row.approved_by,
            approved_at: row.approved_at,
            created_at: row.created_at,
        })
    }
}

/// Insert shape for an expense.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = expenses)]
pub struct NewExpense {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    pub expense_date: String,
    pub vendor: Option<String>,
    pub receipt_url: Option<String>,
    pub status: String,
    pub created_by: i64,
    pub created_at: String,
}

/// Partial update for an expense.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = expenses)]
pub struct ExpenseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub expense_date: Option<String>,
    pub vendor: Option<String>,
    pub receipt_url: Option<String>,
    pub status: Option<String>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<String>,
}

/// Insert shape for an admin.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = admins)]
pub struct NewAdmin {
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

/// Insert shape for a session.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sessions)]
pub struct NewSession {
    pub session_token: String,
    pub admin_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}
