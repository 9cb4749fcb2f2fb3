// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin authentication and session handling.

use time::{Duration, OffsetDateTime};
use tracing::info;

use medfleet_persistence::{AdminData, Persistence, SessionData};

use crate::error::ApiError;

/// How long a session stays valid after login.
pub const SESSION_TTL: Duration = Duration::hours(8);

/// The admin identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    pub admin_id: i64,
    pub email: String,
    pub role: String,
}

impl From<AdminData> for AuthenticatedAdmin {
    fn from(admin: AdminData) -> Self {
        Self {
            admin_id: admin.admin_id,
            email: admin.email,
            role: admin.role,
        }
    }
}

/// Session-based authentication over the admin store.
pub struct AuthenticationService;

impl AuthenticationService {
    fn generate_session_token() -> String {
        format!(
            "mfs_{:032x}{:032x}",
            rand::random::<u128>(),
            rand::random::<u128>()
        )
    }

    /// Verifies credentials and opens a session at `now`.
    ///
    /// Returns the bearer token, its expiry, and the admin identity.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for a wrong email or password; the two cases
    /// are indistinguishable to the caller.
    pub fn login_at(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
        now: OffsetDateTime,
    ) -> Result<(String, String, AuthenticatedAdmin), ApiError> {
        let admin: AdminData = persistence.verify_credentials(email, password, now)?;

        // Logins double as the sweep point for dead sessions.
        persistence.delete_expired_sessions(now)?;

        let token: String = Self::generate_session_token();
        let session: SessionData =
            persistence.create_session(&token, admin.admin_id, now, SESSION_TTL)?;

        info!(admin_id = admin.admin_id, "Admin session opened");
        Ok((token, session.expires_at, admin.into()))
    }

    /// Verifies credentials and opens a session at the current instant.
    ///
    /// # Errors
    ///
    /// See [`Self::login_at`].
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<(String, String, AuthenticatedAdmin), ApiError> {
        Self::login_at(persistence, email, password, OffsetDateTime::now_utc())
    }

    /// Resolves a bearer token to its admin, recording session activity.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for an unknown or expired token.
    pub fn authenticate_at(
        persistence: &mut Persistence,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<AuthenticatedAdmin, ApiError> {
        let session: SessionData = persistence.get_live_session(token, now)?;
        persistence.touch_session(session.session_id, now)?;
        let admin: AdminData = persistence.get_admin(session.admin_id)?;
        Ok(admin.into())
    }

    /// Resolves a bearer token at the current instant.
    ///
    /// # Errors
    ///
    /// See [`Self::authenticate_at`].
    pub fn authenticate(
        persistence: &mut Persistence,
        token: &str,
    ) -> Result<AuthenticatedAdmin, ApiError> {
        Self::authenticate_at(persistence, token, OffsetDateTime::now_utc())
    }

    /// Closes a session. Unknown tokens are ignored, so logout is
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error only on a storage failure.
    pub fn logout(persistence: &mut Persistence, token: &str) -> Result<(), ApiError> {
        persistence.delete_session(token)?;
        Ok(())
    }
}
