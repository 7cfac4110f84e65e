// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.

use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use rota::{Identity, Role};
use rota_persistence::{Persistence, SessionUserRow, UserRow, mutations, queries};

use crate::error::AuthError;

/// An authenticated user with an associated role.
///
/// Carried as an explicit argument into every handler; nothing in the
/// decision logic reads ambient session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user account ID.
    pub user_id: i64,
    /// Login name.
    pub username: String,
    /// The authorization role.
    pub role: Role,
    /// The employee record linked to this account, if any.
    pub employee_id: Option<i64>,
}

impl AuthenticatedUser {
    /// Converts this user into the identity value the core decision
    /// functions take.
    #[must_use]
    pub fn to_identity(&self) -> Identity {
        Identity::new(self.user_id, self.role, self.employee_id)
    }
}

/// Authorization service for role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the user holds the manager role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` for staff users.
    pub fn require_manager(user: &AuthenticatedUser, action: &str) -> Result<(), AuthError> {
        match user.role {
            Role::Manager => Ok(()),
            Role::Staff => Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("manager"),
            }),
        }
    }

    /// Checks that the user is a manager or is acting for
    /// `employee_id` through their own linked employee record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` otherwise.
    pub fn require_self_or_manager(
        user: &AuthenticatedUser,
        employee_id: i64,
        action: &str,
    ) -> Result<(), AuthError> {
        if user.to_identity().acts_for(employee_id) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("manager (or acting for yourself)"),
            })
        }
    }
}

/// Authentication service: password login, session validation,
/// logout.
pub struct AuthenticationService;

impl AuthenticationService {
    /// How long a session stays valid after login.
    const SESSION_EXPIRATION: Duration = Duration::hours(12);

    /// Authenticates a user by username and password and creates a
    /// session.
    ///
    /// The failure reason is identical for an unknown username and a
    /// wrong password.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `expires_at` epoch seconds,
    /// authenticated user).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the credentials
    /// do not match a user.
    pub fn login(
        persistence: &Persistence,
        username: &str,
        password: &str,
    ) -> Result<(String, i64, AuthenticatedUser), AuthError> {
        let user: UserRow = queries::get_user_by_username(persistence.connection(), username)
            .map_err(|_| Self::bad_credentials())?;

        let verified: bool =
            bcrypt::verify(password, &user.password_hash).map_err(|_| Self::bad_credentials())?;
        if !verified {
            return Err(Self::bad_credentials());
        }

        let role: Role = Self::parse_role(&user.role)?;

        let now: i64 = OffsetDateTime::now_utc().unix_timestamp();
        let expires_at: i64 = now + Self::SESSION_EXPIRATION.whole_seconds();
        let token: String = Self::generate_session_token();

        // Opportunistic cleanup; stale sessions have no other reaper.
        mutations::purge_expired_sessions(persistence.connection(), now)
            .map_err(Self::map_persistence_error)?;
        mutations::create_session(persistence.connection(), &token, user.id, expires_at)
            .map_err(Self::map_persistence_error)?;

        info!(username = %user.username, "User logged in");

        Ok((
            token,
            expires_at,
            AuthenticatedUser {
                user_id: user.id,
                username: user.username,
                role,
                employee_id: user.employee_id,
            },
        ))
    }

    /// Validates a session token and returns the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the token is
    /// unknown or the session has expired.
    pub fn validate_session(
        persistence: &Persistence,
        token: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let session: SessionUserRow = queries::get_session_user(persistence.connection(), token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let now: i64 = OffsetDateTime::now_utc().unix_timestamp();
        if now >= session.expires_at {
            mutations::delete_session(persistence.connection(), token)
                .map_err(Self::map_persistence_error)?;
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let role: Role = Self::parse_role(&session.role)?;

        Ok(AuthenticatedUser {
            user_id: session.user_id,
            username: session.username,
            role,
            employee_id: session.employee_id,
        })
    }

    /// Logs out by deleting the session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the session delete fails.
    pub fn logout(persistence: &Persistence, token: &str) -> Result<(), AuthError> {
        mutations::delete_session(persistence.connection(), token)
            .map_err(Self::map_persistence_error)?;
        debug!("Session deleted");
        Ok(())
    }

    /// Hashes a password for storage.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if hashing fails.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: format!("Failed to hash password: {e}"),
            }
        })
    }

    fn generate_session_token() -> String {
        format!(
            "{:016x}{:016x}{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>(),
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn parse_role(role: &str) -> Result<Role, AuthError> {
        Role::parse(role).ok_or_else(|| AuthError::AuthenticationFailed {
            reason: format!("Invalid role: {role}"),
        })
    }

    fn bad_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid username or password"),
        }
    }

    fn map_persistence_error(err: rota_persistence::PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
