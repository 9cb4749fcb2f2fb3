// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service layer for the MedFleet dispatch backend.
//!
//! Each module here is one operational surface: duty roster, bookings,
//! phone verification, fleet records, live monitoring, expenses, and admin
//! accounts. Handlers in the server crate call these functions and map
//! [`ApiError`] kinds onto HTTP statuses; nothing in this crate knows about
//! HTTP.
//!
//! Requests arrive with dates, shifts, and statuses as strings; this layer
//! parses them into domain types and translates storage errors into the
//! stable [`ApiError`] taxonomy.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]
#![allow(clippy::multiple_crate_versions)]

pub mod admin;
pub mod assignments;
pub mod auth;
pub mod bookings;
mod convert;
pub mod error;
pub mod expenses;
pub mod fleet;
pub mod monitoring;
pub mod otp;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use assignments::ConflictPolicy;
pub use auth::{AuthenticatedAdmin, AuthenticationService, SESSION_TTL};
pub use error::ApiError;
