// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Duration;

use crate::admin;
use crate::auth::AuthenticationService;

use super::{store, test_now};

const EMAIL: &str = "ops@medfleet.example";
const PASSWORD: &str = "correct horse battery";

#[test]
fn test_login_round_trip() {
    let mut store = store();
    admin::create_admin(&mut store, EMAIL, PASSWORD, "admin").expect("Failed to create admin");

    let (token, _expires_at, identity) =
        AuthenticationService::login_at(&mut store, EMAIL, PASSWORD, test_now())
            .expect("Login with correct credentials must succeed");
    assert_eq!(identity.email, EMAIL);
    assert!(token.starts_with("mfs_"));

    let authed = AuthenticationService::authenticate_at(&mut store, &token, test_now())
        .expect("A fresh token must authenticate");
    assert_eq!(authed.admin_id, identity.admin_id);
}

#[test]
fn test_wrong_password_and_unknown_email_look_the_same() {
    let mut store = store();
    admin::create_admin(&mut store, EMAIL, PASSWORD, "admin").expect("Failed to create admin");

    let wrong_password =
        AuthenticationService::login_at(&mut store, EMAIL, "nope", test_now())
            .expect_err("Wrong password must be rejected");
    let unknown_email =
        AuthenticationService::login_at(&mut store, "ghost@medfleet.example", PASSWORD, test_now())
            .expect_err("Unknown email must be rejected");

    assert_eq!(wrong_password.kind(), "unauthorized");
    assert_eq!(wrong_password, unknown_email);
}

#[test]
fn test_session_expires_after_eight_hours() {
    let mut store = store();
    admin::create_admin(&mut store, EMAIL, PASSWORD, "admin").expect("Failed to create admin");
    let now = test_now();

    let (token, _, _) = AuthenticationService::login_at(&mut store, EMAIL, PASSWORD, now)
        .expect("Failed to log in");

    AuthenticationService::authenticate_at(&mut store, &token, now + Duration::hours(7))
        .expect("A seven-hour-old session must still authenticate");

    let err =
        AuthenticationService::authenticate_at(&mut store, &token, now + Duration::hours(9))
            .expect_err("A nine-hour-old session must be rejected");
    assert_eq!(err.kind(), "unauthorized");
}

#[test]
fn test_logout_invalidates_token_and_is_idempotent() {
    let mut store = store();
    admin::create_admin(&mut store, EMAIL, PASSWORD, "admin").expect("Failed to create admin");

    let (token, _, _) = AuthenticationService::login_at(&mut store, EMAIL, PASSWORD, test_now())
        .expect("Failed to log in");

    AuthenticationService::logout(&mut store, &token).expect("Logout must succeed");
    AuthenticationService::logout(&mut store, &token)
        .expect("A second logout with the same token must be a no-op");

    let err = AuthenticationService::authenticate_at(&mut store, &token, test_now())
        .expect_err("A logged-out token must be rejected");
    assert_eq!(err.kind(), "unauthorized");
}

#[test]
fn test_garbage_token_is_unauthorized() {
    let mut store = store();
    let err = AuthenticationService::authenticate_at(&mut store, "mfs_bogus", test_now())
        .expect_err("An unknown token must be rejected");
    assert_eq!(err.kind(), "unauthorized");
}

#[test]
fn test_duplicate_admin_email_conflicts() {
    let mut store = store();
    admin::create_admin(&mut store, EMAIL, PASSWORD, "admin").expect("Failed to create admin");
    let err = admin::create_admin(&mut store, EMAIL, PASSWORD, "admin")
        .expect_err("Duplicate email must be rejected");
    assert_eq!(err.kind(), "conflict");
}

#[test]
fn test_short_password_is_rejected() {
    let mut store = store();
    let err = admin::create_admin(&mut store, EMAIL, "short", "admin")
        .expect_err("A short password must be rejected");
    assert_eq!(err.kind(), "validation_error");
}

#[test]
fn test_seed_admin_only_fills_an_empty_store() {
    let mut store = store();
    assert!(
        admin::seed_admin_if_empty(&mut store, EMAIL, PASSWORD).expect("Seeding must succeed")
    );
    assert!(
        !admin::seed_admin_if_empty(&mut store, "other@medfleet.example", PASSWORD)
            .expect("Second seed must be a no-op"),
        "Seeding must not add a second admin"
    );
}
