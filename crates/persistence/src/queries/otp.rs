// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Phone-verification queries.

use diesel::prelude::*;
use time::OffsetDateTime;

use medfleet_domain::{is_verification_current, parse_timestamp};

use crate::data_models::OtpRecord;
use crate::diesel_schema::otp_verifications;
use crate::error::PersistenceError;

/// Fetches the verification record for a phone, if one exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_record(
    conn: &mut SqliteConnection,
    phone: &str,
) -> Result<Option<OtpRecord>, PersistenceError> {
    let record: Option<OtpRecord> = otp_verifications::table
        .filter(otp_verifications::phone.eq(phone))
        .first(conn)
        .optional()?;

    Ok(record)
}

/// Returns true if the phone has a verification confirmed within the last
/// twenty-four hours.
///
/// A confirmed record's `updated_at` is the confirmation instant, so the
/// window is measured from there.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp cannot be
/// parsed.
pub fn is_phone_verified(
    conn: &mut SqliteConnection,
    phone: &str,
    now: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    let Some(record) = get_record(conn, phone)? else {
        return Ok(false);
    };

    let verified_at = parse_timestamp(&record.updated_at)?;
    Ok(is_verification_current(
        record.is_verified(),
        verified_at,
        now,
    ))
}
