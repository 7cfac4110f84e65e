// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, params};
use rota_domain::ReleaseRequest;

use crate::error::PersistenceError;

/// Inserts a release request and returns the assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_release(
    conn: &Connection,
    request: &ReleaseRequest,
) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO release_requests
             (shift_id, requester_id, claimer_id, status, message, manager_note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            request.shift_id,
            request.requester_id,
            request.claimer_id,
            request.status.as_str(),
            request.message,
            request.manager_note,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Writes back a release request's mutable columns (status, claimer,
/// manager note).
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the request does not
/// exist.
pub fn update_release(
    conn: &Connection,
    request_id: i64,
    request: &ReleaseRequest,
) -> Result<(), PersistenceError> {
    let changed = conn.execute(
        "UPDATE release_requests
         SET claimer_id = ?1, status = ?2, manager_note = ?3
         WHERE request_id = ?4",
        params![
            request.claimer_id,
            request.status.as_str(),
            request.manager_note,
            request_id,
        ],
    )?;

    if changed == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Release request {request_id} not found"
        )));
    }
    Ok(())
}
