// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::PersistenceError;

/// Records a new session token for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The opaque session token
/// * `user_id` - The authenticated user
/// * `expires_at` - Expiry as unix epoch seconds
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &Connection,
    token: &str,
    user_id: i64,
    expires_at: i64,
) -> Result<(), PersistenceError> {
    conn.execute(
        "INSERT INTO sessions (session_token, user_id, expires_at) VALUES (?1, ?2, ?3)",
        params![token, user_id, expires_at],
    )?;
    debug!(user_id, "Created session");
    Ok(())
}

/// Deletes a session by token. Deleting an unknown token is not an
/// error; logout is idempotent.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session(conn: &Connection, token: &str) -> Result<(), PersistenceError> {
    conn.execute(
        "DELETE FROM sessions WHERE session_token = ?1",
        params![token],
    )?;
    Ok(())
}

/// Removes sessions whose expiry has passed.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `now` - The current time as unix epoch seconds
///
/// # Returns
///
/// The number of sessions removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn purge_expired_sessions(conn: &Connection, now: i64) -> Result<usize, PersistenceError> {
    let purged = conn.execute("DELETE FROM sessions WHERE expires_at <= ?1", params![now])?;
    if purged > 0 {
        debug!(purged, "Purged expired sessions");
    }
    Ok(purged)
}
