// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Duration;

use crate::otp;
use crate::request_response::{SendOtpRequest, VerifyOtpRequest};

use super::{store, test_now};

const PHONE: &str = "+919900112233";

fn send_request() -> SendOtpRequest {
    SendOtpRequest {
        phone: PHONE.to_string(),
    }
}

#[test]
fn test_issued_code_is_six_digits() {
    let mut store = store();
    let sent =
        otp::send_code_at(&mut store, &send_request(), test_now()).expect("Failed to issue code");
    assert_eq!(sent.code.len(), 6);
    assert!(sent.code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(sent.phone, PHONE);
}

#[test]
fn test_code_confirms_within_five_minutes() {
    let mut store = store();
    let now = test_now();
    let sent = otp::send_code_at(&mut store, &send_request(), now).expect("Failed to issue code");

    let verified = otp::verify_code_at(
        &mut store,
        &VerifyOtpRequest {
            phone: PHONE.to_string(),
            code: sent.code,
        },
        now + Duration::minutes(4),
    )
    .expect("A code must confirm inside its five-minute window");

    assert!(verified.verified);
    let status = otp::check_status_at(&mut store, PHONE, now + Duration::minutes(5))
        .expect("Failed to check status");
    assert!(status.verified);
}

#[test]
fn test_stale_code_is_expired_and_consumed() {
    let mut store = store();
    let now = test_now();
    let sent = otp::send_code_at(&mut store, &send_request(), now).expect("Failed to issue code");

    let err = otp::verify_code_at(
        &mut store,
        &VerifyOtpRequest {
            phone: PHONE.to_string(),
            code: sent.code.clone(),
        },
        now + Duration::minutes(6),
    )
    .expect_err("A six-minute-old code must be rejected");
    assert_eq!(err.kind(), "expired");

    // The expired record is deleted, so a retry finds nothing.
    let retry = otp::verify_code_at(
        &mut store,
        &VerifyOtpRequest {
            phone: PHONE.to_string(),
            code: sent.code,
        },
        now + Duration::minutes(7),
    )
    .expect_err("The record must be gone after expiry");
    assert_eq!(retry.kind(), "not_found");
}

#[test]
fn test_wrong_code_is_mismatch_and_retryable() {
    let mut store = store();
    let now = test_now();
    let sent = otp::send_code_at(&mut store, &send_request(), now).expect("Failed to issue code");

    let err = otp::verify_code_at(
        &mut store,
        &VerifyOtpRequest {
            phone: PHONE.to_string(),
            code: String::from("000000"),
        },
        now,
    )
    .expect_err("A wrong code must be rejected");
    assert_eq!(err.kind(), "mismatch");

    // The record survives a mismatch; the right code still works.
    otp::verify_code_at(
        &mut store,
        &VerifyOtpRequest {
            phone: PHONE.to_string(),
            code: sent.code,
        },
        now + Duration::minutes(1),
    )
    .expect("The correct code must still confirm after a mismatch");
}

#[test]
fn test_verification_window_closes_after_a_day() {
    let mut store = store();
    let now = test_now();
    let sent = otp::send_code_at(&mut store, &send_request(), now).expect("Failed to issue code");
    otp::verify_code_at(
        &mut store,
        &VerifyOtpRequest {
            phone: PHONE.to_string(),
            code: sent.code,
        },
        now,
    )
    .expect("Failed to confirm code");

    let inside = otp::check_status_at(&mut store, PHONE, now + Duration::hours(23))
        .expect("Failed to check status");
    assert!(inside.verified);

    let outside = otp::check_status_at(&mut store, PHONE, now + Duration::hours(25))
        .expect("Failed to check status");
    assert!(!outside.verified);
}

#[test]
fn test_reissue_voids_prior_verification() {
    let mut store = store();
    let now = test_now();
    let sent = otp::send_code_at(&mut store, &send_request(), now).expect("Failed to issue code");
    otp::verify_code_at(
        &mut store,
        &VerifyOtpRequest {
            phone: PHONE.to_string(),
            code: sent.code,
        },
        now,
    )
    .expect("Failed to confirm code");

    otp::send_code_at(&mut store, &send_request(), now + Duration::minutes(10))
        .expect("Failed to reissue code");

    let status = otp::check_status_at(&mut store, PHONE, now + Duration::minutes(11))
        .expect("Failed to check status");
    assert!(
        !status.verified,
        "A fresh unconfirmed code must replace the verified record"
    );
}

#[test]
fn test_unknown_phone_is_simply_unverified() {
    let mut store = store();
    let status = otp::check_status_at(&mut store, "+910000000000", test_now())
        .expect("Status check must not fail for unknown phones");
    assert!(!status.verified);
}
