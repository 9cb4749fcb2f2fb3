// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod availability;
mod dates;
mod error;
mod otp_window;
mod status;
mod types;

pub use availability::{
    AssignmentSlot, RosterEntity, is_entity_available, is_entity_available_for_all,
};
pub use dates::{
    MAX_RANGE_DAYS, format_service_date, format_timestamp, generate_date_range, parse_service_date,
    parse_timestamp,
};
pub use error::DomainError;
pub use otp_window::{
    OTP_VALIDITY, VERIFICATION_WINDOW, code_expiry, is_code_expired, is_verification_current,
};
pub use status::{
    AmbulanceStatus, AssignmentStatus, BookingStatus, DriverStatus, ExpenseStatus, Shift,
    apply_status_change,
};
pub use types::{Ambulance, Assignment, Booking, Driver, Expense, LocationSample};
