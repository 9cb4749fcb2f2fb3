// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin operator and session queries.

use diesel::prelude::*;
use time::OffsetDateTime;

use medfleet_domain::parse_timestamp;

use crate::data_models::{AdminData, SessionData};
use crate::diesel_schema::{admins, sessions};
use crate::error::PersistenceError;

/// Fetches an admin by ID.
///
/// # Errors
///
/// Returns `NotFound` if the admin does not exist.
pub fn get_admin(conn: &mut SqliteConnection, admin_id: i64) -> Result<AdminData, PersistenceError> {
    let admin: AdminData = admins::table
        .filter(admins::admin_id.eq(admin_id))
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Admin {admin_id}"))
            }
            other => other.into(),
        })?;

    Ok(admin)
}

/// Counts registered admins. Used at startup to decide whether to seed one.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_admins(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    let count: i64 = admins::table.count().get_result(conn)?;
    Ok(count)
}

/// Resolves a bearer token to a live session.
///
/// # Errors
///
/// * `SessionNotFound` - no session carries this token
/// * `SessionExpired` - the session exists but its expiry has passed
pub fn get_live_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    now: OffsetDateTime,
) -> Result<SessionData, PersistenceError> {
    let session: SessionData = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::SessionNotFound(String::from("Unknown session token"))
            }
            other => other.into(),
        })?;

    let expires_at = parse_timestamp(&session.expires_at)?;
    if now > expires_at {
        return Err(PersistenceError::SessionExpired(format!(
            "Session expired at {}",
            session.expires_at
        )));
    }

    Ok(session)
}
