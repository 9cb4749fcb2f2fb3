// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin operator and session mutations.

use diesel::prelude::*;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use medfleet_domain::format_timestamp;

use crate::data_models::{AdminData, NewAdmin, NewSession, SessionData};
use crate::diesel_schema::{admins, sessions};
use crate::error::PersistenceError;
use crate::iso;

/// Creates a new admin operator.
///
/// The plain-text password is hashed with bcrypt before storage. Email
/// uniqueness is case-insensitive.
///
/// # Errors
///
/// Returns `Conflict` if the email is already registered.
pub fn create_admin(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
    role: &str,
    now: OffsetDateTime,
) -> Result<AdminData, PersistenceError> {
    info!(email, role, "Creating admin");

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let row: AdminData = diesel::insert_into(admins::table)
        .values(&NewAdmin {
            email: email.to_string(),
            password_hash,
            role: role.to_string(),
            created_at: iso(now)?,
        })
        .get_result(conn)?;

    Ok(row)
}

/// Verifies a login attempt and records the login time on success.
///
/// The failure mode is identical for an unknown email and a wrong password
/// so a caller cannot probe which emails exist.
///
/// # Errors
///
/// Returns `InvalidCredentials` when the email is unknown or the password
/// does not match.
pub fn verify_credentials(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
    now: OffsetDateTime,
) -> Result<AdminData, PersistenceError> {
    debug!(email, "Verifying admin credentials");

    let admin: AdminData = admins::table
        .filter(admins::email.eq(email))
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => PersistenceError::InvalidCredentials,
            other => other.into(),
        })?;

    if !bcrypt::verify(password, &admin.password_hash)? {
        return Err(PersistenceError::InvalidCredentials);
    }

    let stamp: String = iso(now)?;
    let row: AdminData = diesel::update(admins::table.filter(admins::admin_id.eq(admin.admin_id)))
        .set(admins::last_login_at.eq(Some(stamp)))
        .get_result(conn)?;

    info!(admin_id = row.admin_id, "Admin logged in");
    Ok(row)
}

/// Creates a session for an admin.
///
/// # Arguments
///
/// * `session_token` - The opaque bearer token, generated by the caller
/// * `ttl` - How long the session stays valid from `now`
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    admin_id: i64,
    now: OffsetDateTime,
    ttl: Duration,
) -> Result<SessionData, PersistenceError> {
    debug!(admin_id, "Creating session");

    let stamp: String = iso(now)?;
    let row: SessionData = diesel::insert_into(sessions::table)
        .values(&NewSession {
            session_token: session_token.to_string(),
            admin_id,
            created_at: stamp.clone(),
            last_activity_at: stamp,
            expires_at: format_timestamp(now + ttl)?,
        })
        .get_result(conn)?;

    Ok(row)
}

/// Records activity on a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn touch_session(
    conn: &mut SqliteConnection,
    session_id: i64,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    debug!(session_id, "Updating session activity");

    diesel::update(sessions::table.filter(sessions::session_id.eq(session_id)))
        .set(sessions::last_activity_at.eq(iso(now)?))
        .execute(conn)?;

    Ok(())
}

/// Deletes a session by token. Used for logout; deleting a token that no
/// longer exists is not an error.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
        .execute(conn)?;

    Ok(())
}

/// Deletes all sessions whose expiry has passed.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    debug!("Deleting expired sessions");

    let cutoff: String = format_timestamp(now)?;
    let rows_affected: usize =
        diesel::delete(sessions::table.filter(sessions::expires_at.lt(cutoff))).execute(conn)?;

    if rows_affected > 0 {
        info!(rows_affected, "Deleted expired sessions");
    }
    Ok(rows_affected)
}
