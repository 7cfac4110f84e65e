// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, Result as SqliteResult, params};

use crate::error::PersistenceError;
use crate::rows::{SessionUserRow, UserRow};

/// Retrieves a user account by login name (case-insensitive).
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such user exists.
pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<UserRow, PersistenceError> {
    conn.query_row(
        "SELECT user_id, username, password_hash, role, employee_id
         FROM users WHERE username = ?1",
        params![username],
        |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                role: row.get(3)?,
                employee_id: row.get(4)?,
            })
        },
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => {
            PersistenceError::NotFound(format!("User '{username}' not found"))
        }
        other => other.into(),
    })
}

/// Looks up a session token and returns the joined user, or `None`
/// if no such session exists. Expiry checking is the caller's job;
/// the expiry timestamp rides along in the row.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_session_user(
    conn: &Connection,
    token: &str,
) -> Result<Option<SessionUserRow>, PersistenceError> {
    let result: SqliteResult<SessionUserRow> = conn.query_row(
        "SELECT u.user_id, u.username, u.role, u.employee_id, s.expires_at
         FROM sessions s
         JOIN users u ON u.user_id = s.user_id
         WHERE s.session_token = ?1",
        params![token],
        |row| {
            Ok(SessionUserRow {
                user_id: row.get(0)?,
                username: row.get(1)?,
                role: row.get(2)?,
                employee_id: row.get(3)?,
                expires_at: row.get(4)?,
            })
        },
    );

    match result {
        Ok(row) => Ok(Some(row)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
