// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Phone verification operations.
//!
//! Codes are six digits and live for five minutes; a confirmed verification
//! vouches for the phone for twenty-four hours. The issued code is returned
//! to the caller because SMS delivery is handled outside this service.

use time::OffsetDateTime;
use tracing::info;

use medfleet_persistence::Persistence;

use crate::convert::require_non_empty;
use crate::error::ApiError;
use crate::request_response::{
    OtpStatusResponse, SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse,
};

fn generate_code() -> String {
    // Always six digits, no leading-zero padding needed.
    rand::random_range(100_000..1_000_000u32).to_string()
}

/// Issues a fresh verification code for a phone at `now`.
///
/// Reissuing replaces any existing record for the phone and voids its
/// verification.
///
/// # Errors
///
/// Returns `validation_error` for an empty phone.
pub fn send_code_at(
    persistence: &mut Persistence,
    request: &SendOtpRequest,
    now: OffsetDateTime,
) -> Result<SendOtpResponse, ApiError> {
    require_non_empty("phone", &request.phone)?;

    let code = generate_code();
    let record = persistence.issue_otp_code(&request.phone, &code, now)?;
    info!(phone = %record.phone, "Issued verification code");

    Ok(SendOtpResponse {
        phone: record.phone,
        code: record.code,
        expires_at: record.expires_at,
    })
}

/// Issues a fresh verification code at the current instant.
///
/// # Errors
///
/// See [`send_code_at`].
pub fn send_code(
    persistence: &mut Persistence,
    request: &SendOtpRequest,
) -> Result<SendOtpResponse, ApiError> {
    send_code_at(persistence, request, OffsetDateTime::now_utc())
}

/// Confirms a verification code at `now`.
///
/// # Errors
///
/// * `not_found` - no code has been issued for this phone
/// * `expired` - the code's five-minute window has passed; the record is
///   deleted and a new code must be requested
/// * `mismatch` - the code does not match
pub fn verify_code_at(
    persistence: &mut Persistence,
    request: &VerifyOtpRequest,
    now: OffsetDateTime,
) -> Result<VerifyOtpResponse, ApiError> {
    require_non_empty("phone", &request.phone)?;
    require_non_empty("code", &request.code)?;

    let record = persistence.confirm_otp_code(&request.phone, &request.code, now)?;
    info!(phone = %record.phone, "Phone verified");

    Ok(VerifyOtpResponse {
        phone: record.phone,
        verified: true,
    })
}

/// Confirms a verification code at the current instant.
///
/// # Errors
///
/// See [`verify_code_at`].
pub fn verify_code(
    persistence: &mut Persistence,
    request: &VerifyOtpRequest,
) -> Result<VerifyOtpResponse, ApiError> {
    verify_code_at(persistence, request, OffsetDateTime::now_utc())
}

/// Reports whether a phone's verification window is still open at `now`.
///
/// An unknown phone is simply unverified, not an error.
///
/// # Errors
///
/// Returns an error only if the store cannot be read.
pub fn check_status_at(
    persistence: &mut Persistence,
    phone: &str,
    now: OffsetDateTime,
) -> Result<OtpStatusResponse, ApiError> {
    let verified = persistence.is_phone_verified(phone, now)?;
    Ok(OtpStatusResponse {
        phone: phone.to_string(),
        verified,
    })
}

/// Reports a phone's verification standing at the current instant.
///
/// # Errors
///
/// See [`check_status_at`].
pub fn check_status(
    persistence: &mut Persistence,
    phone: &str,
) -> Result<OtpStatusResponse, ApiError> {
    check_status_at(persistence, phone, OffsetDateTime::now_utc())
}
