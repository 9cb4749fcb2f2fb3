// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Phone-verification mutations.
//!
//! One row per phone number. Issuing a new code replaces any prior record
//! for that phone, which also clears a previous verification.

use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

use medfleet_domain::{code_expiry, format_timestamp, is_code_expired, parse_timestamp};

use crate::data_models::{NewOtpRecord, OtpRecord};
use crate::diesel_schema::otp_verifications;
use crate::error::PersistenceError;
use crate::iso;

/// Issues a verification code for a phone number.
///
/// Replaces any existing record for the phone, restarting the five-minute
/// code window and discarding any earlier verification.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn issue_code(
    conn: &mut SqliteConnection,
    phone: &str,
    code: &str,
    now: OffsetDateTime,
) -> Result<OtpRecord, PersistenceError> {
    info!(phone, "Issuing verification code");

    let record = NewOtpRecord {
        phone: phone.to_string(),
        code: code.to_string(),
        expires_at: format_timestamp(code_expiry(now))?,
        verified: 0,
        updated_at: iso(now)?,
    };

    let row: OtpRecord = diesel::replace_into(otp_verifications::table)
        .values(&record)
        .get_result(conn)?;

    Ok(row)
}

/// Confirms a verification code.
///
/// On success the record is marked verified and `updated_at` is set to the
/// confirmation instant, which starts the twenty-four-hour window during
/// which the phone counts as verified. A lapsed code is deleted on sight so
/// a stale row cannot be retried indefinitely.
///
/// # Errors
///
/// * `NotFound` - no code was ever issued for this phone
/// * `OtpExpired` - the code's five-minute window has lapsed
/// * `OtpMismatch` - the submitted code is wrong
pub fn confirm_code(
    conn: &mut SqliteConnection,
    phone: &str,
    code: &str,
    now: OffsetDateTime,
) -> Result<OtpRecord, PersistenceError> {
    debug!(phone, "Confirming verification code");

    let stamp: String = iso(now)?;

    conn.transaction(|conn| {
        let record: OtpRecord = otp_verifications::table
            .filter(otp_verifications::phone.eq(phone))
            .first(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    PersistenceError::NotFound(format!("No verification code for {phone}"))
                }
                other => other.into(),
            })?;

        let expires_at = parse_timestamp(&record.expires_at)?;
        if is_code_expired(expires_at, now) {
            diesel::delete(otp_verifications::table.filter(otp_verifications::phone.eq(phone)))
                .execute(conn)?;
            return Err(PersistenceError::OtpExpired(phone.to_string()));
        }

        if record.code != code {
            return Err(PersistenceError::OtpMismatch(phone.to_string()));
        }

        let row: OtpRecord =
            diesel::update(otp_verifications::table.filter(otp_verifications::phone.eq(phone)))
                .set((
                    otp_verifications::verified.eq(1),
                    otp_verifications::updated_at.eq(stamp),
                ))
                .get_result(conn)?;

        Ok(row)
    })
}
