// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin credential and session tests.

use time::Duration;

use crate::tests::test_now;
use crate::{Persistence, PersistenceError};

const EMAIL: &str = "ops@example.com";
const PASSWORD: &str = "correct horse battery staple";
const TTL: Duration = Duration::hours(8);

#[test]
fn test_login_round_trip() {
    let mut persistence = Persistence::new_in_memory().expect("store");

    persistence
        .create_admin(EMAIL, PASSWORD, "admin", test_now())
        .expect("create admin");

    let admin = persistence
        .verify_credentials(EMAIL, PASSWORD, test_now())
        .expect("verify credentials");
    assert_eq!(admin.email, EMAIL);
    assert!(admin.last_login_at.is_some());
}

#[test]
fn test_wrong_password_and_unknown_email_fail_identically() {
    let mut persistence = Persistence::new_in_memory().expect("store");

    persistence
        .create_admin(EMAIL, PASSWORD, "admin", test_now())
        .expect("create admin");

    let wrong_password = persistence
        .verify_credentials(EMAIL, "nope", test_now())
        .expect_err("wrong password");
    let unknown_email = persistence
        .verify_credentials("nobody@example.com", PASSWORD, test_now())
        .expect_err("unknown email");

    assert_eq!(wrong_password, PersistenceError::InvalidCredentials);
    assert_eq!(unknown_email, PersistenceError::InvalidCredentials);
}

#[test]
fn test_duplicate_email_is_a_conflict() {
    let mut persistence = Persistence::new_in_memory().expect("store");

    persistence
        .create_admin(EMAIL, PASSWORD, "admin", test_now())
        .expect("create admin");

    let err = persistence
        .create_admin("OPS@EXAMPLE.COM", "other", "admin", test_now())
        .expect_err("email uniqueness is case-insensitive");
    assert!(matches!(err, PersistenceError::Conflict(_)));
}

#[test]
fn test_session_is_live_until_expiry() {
    let mut persistence = Persistence::new_in_memory().expect("store");
    let now = test_now();

    let admin = persistence
        .create_admin(EMAIL, PASSWORD, "admin", now)
        .expect("create admin");
    persistence
        .create_session("token-abc", admin.admin_id, now, TTL)
        .expect("create session");

    let session = persistence
        .get_live_session("token-abc", now + Duration::hours(7))
        .expect("session still live");
    assert_eq!(session.admin_id, admin.admin_id);

    let err = persistence
        .get_live_session("token-abc", now + Duration::hours(9))
        .expect_err("session past expiry");
    assert!(matches!(err, PersistenceError::SessionExpired(_)));
}

#[test]
fn test_unknown_token_is_rejected() {
    let mut persistence = Persistence::new_in_memory().expect("store");

    let err = persistence
        .get_live_session("no-such-token", test_now())
        .expect_err("unknown token");
    assert!(matches!(err, PersistenceError::SessionNotFound(_)));
}

#[test]
fn test_logout_deletes_session() {
    let mut persistence = Persistence::new_in_memory().expect("store");
    let now = test_now();

    let admin = persistence
        .create_admin(EMAIL, PASSWORD, "admin", now)
        .expect("create admin");
    persistence
        .create_session("token-abc", admin.admin_id, now, TTL)
        .expect("create session");

    persistence.delete_session("token-abc").expect("logout");

    assert!(matches!(
        persistence.get_live_session("token-abc", now),
        Err(PersistenceError::SessionNotFound(_))
    ));
}

#[test]
fn test_expired_session_sweep() {
    let mut persistence = Persistence::new_in_memory().expect("store");
    let now = test_now();

    let admin = persistence
        .create_admin(EMAIL, PASSWORD, "admin", now)
        .expect("create admin");
    persistence
        .create_session("old", admin.admin_id, now - Duration::hours(10), TTL)
        .expect("stale session");
    persistence
        .create_session("fresh", admin.admin_id, now, TTL)
        .expect("fresh session");

    let swept = persistence.delete_expired_sessions(now).expect("sweep");
    assert_eq!(swept, 1);
    persistence
        .get_live_session("fresh", now)
        .expect("fresh session survives sweep");
}
