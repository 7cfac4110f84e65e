// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, params};

use crate::error::PersistenceError;

/// Inserts a user account and returns the assigned ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - Login name (unique, case-insensitive)
/// * `password_hash` - bcrypt hash of the password
/// * `role` - Stored role string (`manager` or `staff`)
/// * `employee_id` - The linked employee record, if any
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate
/// username).
pub fn insert_user(
    conn: &Connection,
    username: &str,
    password_hash: &str,
    role: &str,
    employee_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO users (username, password_hash, role, employee_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![username, password_hash, role, employee_id],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Points a user account at its employee record.
///
/// Used when the account is created before the employee row, so the
/// two inserts can backlink within one transaction.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user does not exist.
pub fn link_user_to_employee(
    conn: &Connection,
    user_id: i64,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    let rows_changed: usize = conn.execute(
        "UPDATE users SET employee_id = ?1 WHERE user_id = ?2",
        params![employee_id, user_id],
    )?;
    if rows_changed == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User with ID {user_id} not found"
        )));
    }
    Ok(())
}
