// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, params};
use rota_domain::{TimeOffRequest, TimeOffStatus};

use crate::error::PersistenceError;
use crate::rows::format_date;

/// Inserts a time-off request and returns the assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_time_off(
    conn: &Connection,
    request: &TimeOffRequest,
) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO time_off (employee_id, date_from, date_to, type, reason, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            request.employee_id,
            format_date(request.date_from)?,
            format_date(request.date_to)?,
            request.kind.as_str(),
            request.reason,
            request.status.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Sets a time-off request's approval status.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the request does not
/// exist.
pub fn set_time_off_status(
    conn: &Connection,
    time_off_id: i64,
    status: TimeOffStatus,
) -> Result<(), PersistenceError> {
    let changed = conn.execute(
        "UPDATE time_off SET status = ?1 WHERE time_off_id = ?2",
        params![status.as_str(), time_off_id],
    )?;

    if changed == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Time-off request {time_off_id} not found"
        )));
    }
    Ok(())
}

/// Deletes a time-off request. Withdrawing a request removes the row
/// outright; only decided requests are kept for history.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the request does not
/// exist.
pub fn delete_time_off(conn: &Connection, time_off_id: i64) -> Result<(), PersistenceError> {
    let changed = conn.execute(
        "DELETE FROM time_off WHERE time_off_id = ?1",
        params![time_off_id],
    )?;

    if changed == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Time-off request {time_off_id} not found"
        )));
    }
    Ok(())
}
