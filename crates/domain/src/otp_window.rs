// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timing rules for the phone-verification gate.
//!
//! Two windows govern an OTP record: a code is usable at most until five
//! minutes after issuance, and a completed verification counts as proof of
//! identity for twenty-four hours from the moment it was confirmed. Both
//! checks take the current instant as an argument so callers (and tests)
//! control the clock.

use time::{Duration, OffsetDateTime};

/// How long an issued code stays usable.
pub const OTP_VALIDITY: Duration = Duration::minutes(5);

/// How long a completed verification counts as proof of identity.
pub const VERIFICATION_WINDOW: Duration = Duration::hours(24);

/// Computes the expiry instant for a code issued at `issued_at`.
#[must_use]
pub fn code_expiry(issued_at: OffsetDateTime) -> OffsetDateTime {
    issued_at + OTP_VALIDITY
}

/// Returns true if a code with the given expiry is no longer usable at `now`.
///
/// The code is usable up to and including the expiry instant itself.
#[must_use]
pub fn is_code_expired(expires_at: OffsetDateTime, now: OffsetDateTime) -> bool {
    now > expires_at
}

/// Returns true if a verification confirmed at `verified_at` still counts as
/// proof of identity at `now`.
#[must_use]
pub fn is_verification_current(
    verified: bool,
    verified_at: OffsetDateTime,
    now: OffsetDateTime,
) -> bool {
    verified && now - verified_at < VERIFICATION_WINDOW
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_code_usable_just_before_expiry() {
        let issued = datetime!(2024-06-01 12:00:00 UTC);
        let expires = code_expiry(issued);
        assert!(!is_code_expired(expires, issued + Duration::seconds(299)));
    }

    #[test]
    fn test_code_expired_just_after_expiry() {
        let issued = datetime!(2024-06-01 12:00:00 UTC);
        let expires = code_expiry(issued);
        assert!(is_code_expired(expires, issued + Duration::seconds(301)));
    }

    #[test]
    fn test_code_usable_at_exact_expiry_instant() {
        let issued = datetime!(2024-06-01 12:00:00 UTC);
        let expires = code_expiry(issued);
        assert!(!is_code_expired(expires, expires));
    }

    #[test]
    fn test_verification_current_just_inside_window() {
        let verified_at = datetime!(2024-06-01 12:00:00 UTC);
        let now = verified_at + Duration::hours(23) + Duration::minutes(59);
        assert!(is_verification_current(true, verified_at, now));
    }

    #[test]
    fn test_verification_lapsed_just_outside_window() {
        let verified_at = datetime!(2024-06-01 12:00:00 UTC);
        let now = verified_at + Duration::hours(24) + Duration::minutes(1);
        assert!(!is_verification_current(true, verified_at, now));
    }

    #[test]
    fn test_unverified_record_is_never_current() {
        let verified_at = datetime!(2024-06-01 12:00:00 UTC);
        assert!(!is_verification_current(
            false,
            verified_at,
            verified_at + Duration::minutes(1)
        ));
    }
}
