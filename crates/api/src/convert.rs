// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level parsing helpers shared by the service modules.
//!
//! All of these turn parse failures into `InvalidInput` carrying the field
//! name, so handlers never construct validation errors by hand.

use std::str::FromStr;
use time::{Date, OffsetDateTime};

use medfleet_domain::{
    AmbulanceStatus, AssignmentStatus, BookingStatus, DriverStatus, ExpenseStatus, Shift,
    format_timestamp, parse_service_date,
};

use crate::error::ApiError;

pub(crate) fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_service_date(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

pub(crate) fn parse_shift(value: &str) -> Result<Shift, ApiError> {
    Shift::from_str(value).map_err(|e| ApiError::InvalidInput {
        field: String::from("shift"),
        message: e.to_string(),
    })
}

pub(crate) fn parse_driver_status(value: &str) -> Result<DriverStatus, ApiError> {
    DriverStatus::from_str(value).map_err(|e| ApiError::InvalidInput {
        field: String::from("status"),
        message: e.to_string(),
    })
}

pub(crate) fn parse_ambulance_status(value: &str) -> Result<AmbulanceStatus, ApiError> {
    AmbulanceStatus::from_str(value).map_err(|e| ApiError::InvalidInput {
        field: String::from("status"),
        message: e.to_string(),
    })
}

pub(crate) fn parse_assignment_status(value: &str) -> Result<AssignmentStatus, ApiError> {
    AssignmentStatus::from_str(value).map_err(|e| ApiError::InvalidInput {
        field: String::from("status"),
        message: e.to_string(),
    })
}

pub(crate) fn parse_booking_status(value: &str) -> Result<BookingStatus, ApiError> {
    BookingStatus::from_str(value).map_err(|e| ApiError::InvalidInput {
        field: String::from("status"),
        message: e.to_string(),
    })
}

pub(crate) fn parse_expense_status(value: &str) -> Result<ExpenseStatus, ApiError> {
    ExpenseStatus::from_str(value).map_err(|e| ApiError::InvalidInput {
        field: String::from("status"),
        message: e.to_string(),
    })
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("must not be empty"),
        });
    }
    Ok(())
}

pub(crate) fn stamp(now: OffsetDateTime) -> Result<String, ApiError> {
    format_timestamp(now).map_err(ApiError::from)
}
