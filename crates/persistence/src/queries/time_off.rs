// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, Result as SqliteResult, params};
use time::Date;

use rota_domain::{TimeOffRequest, TimeOffStatus};

use crate::error::PersistenceError;
use crate::rows::{TimeOffParts, format_date, time_off_from_parts};

const TIME_OFF_COLUMNS: &str =
    "time_off_id, employee_id, date_from, date_to, type, reason, status";

fn time_off_parts(row: &rusqlite::Row<'_>) -> SqliteResult<TimeOffParts> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

/// Retrieves a time-off request by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the request does not
/// exist.
pub fn get_time_off(conn: &Connection, time_off_id: i64) -> Result<TimeOffRequest, PersistenceError> {
    let parts = conn
        .query_row(
            &format!("SELECT {TIME_OFF_COLUMNS} FROM time_off WHERE time_off_id = ?1"),
            params![time_off_id],
            time_off_parts,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                PersistenceError::NotFound(format!("Time-off request {time_off_id} not found"))
            }
            other => other.into(),
        })?;

    time_off_from_parts(parts)
}

/// Lists time-off requests, newest range first, optionally filtered
/// by status.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn list_time_off(
    conn: &Connection,
    status: Option<TimeOffStatus>,
) -> Result<Vec<TimeOffRequest>, PersistenceError> {
    let mut requests: Vec<TimeOffRequest> = Vec::new();

    if let Some(status) = status {
        let mut stmt = conn.prepare(&format!(
            "SELECT {TIME_OFF_COLUMNS} FROM time_off
             WHERE status = ?1 ORDER BY date_from DESC, time_off_id DESC"
        ))?;
        let rows = stmt.query_map(params![status.as_str()], time_off_parts)?;
        for row in rows {
            requests.push(time_off_from_parts(row?)?);
        }
    } else {
        let mut stmt = conn.prepare(&format!(
            "SELECT {TIME_OFF_COLUMNS} FROM time_off
             ORDER BY date_from DESC, time_off_id DESC"
        ))?;
        let rows = stmt.query_map([], time_off_parts)?;
        for row in rows {
            requests.push(time_off_from_parts(row?)?);
        }
    }

    Ok(requests)
}

/// Lists one employee's time-off requests, newest range first.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn list_time_off_for_employee(
    conn: &Connection,
    employee_id: i64,
) -> Result<Vec<TimeOffRequest>, PersistenceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TIME_OFF_COLUMNS} FROM time_off
         WHERE employee_id = ?1 ORDER BY date_from DESC, time_off_id DESC"
    ))?;

    let rows = stmt.query_map(params![employee_id], time_off_parts)?;

    let mut requests: Vec<TimeOffRequest> = Vec::new();
    for row in rows {
        requests.push(time_off_from_parts(row?)?);
    }
    Ok(requests)
}

/// Finds an approved time-off request for `employee_id` whose
/// inclusive date range covers `date`.
///
/// # Errors
///
/// Returns an error if the query fails or the row fails to decode.
pub fn find_blocking_time_off(
    conn: &Connection,
    employee_id: i64,
    date: Date,
) -> Result<Option<TimeOffRequest>, PersistenceError> {
    let date_text: String = format_date(date)?;

    let result: SqliteResult<TimeOffParts> = conn.query_row(
        &format!(
            "SELECT {TIME_OFF_COLUMNS} FROM time_off
             WHERE employee_id = ?1 AND status = 'approved'
               AND date_from <= ?2 AND date_to >= ?2
             LIMIT 1"
        ),
        params![employee_id, date_text],
        time_off_parts,
    );

    match result {
        Ok(parts) => Ok(Some(time_off_from_parts(parts)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Finds a non-rejected time-off request for `employee_id` whose
/// inclusive date range intersects `[from, to]`, excluding
/// `exclude_id`. Used as the duplicate-request guard.
///
/// # Errors
///
/// Returns an error if the query fails or the row fails to decode.
pub fn find_overlapping_time_off(
    conn: &Connection,
    employee_id: i64,
    from: Date,
    to: Date,
    exclude_id: Option<i64>,
) -> Result<Option<TimeOffRequest>, PersistenceError> {
    let from_text: String = format_date(from)?;
    let to_text: String = format_date(to)?;

    let result: SqliteResult<TimeOffParts> = if let Some(exclude) = exclude_id {
        conn.query_row(
            &format!(
                "SELECT {TIME_OFF_COLUMNS} FROM time_off
                 WHERE employee_id = ?1 AND status != 'rejected'
                   AND date_from <= ?2 AND date_to >= ?3
                   AND time_off_id != ?4
                 LIMIT 1"
            ),
            params![employee_id, to_text, from_text, exclude],
            time_off_parts,
        )
    } else {
        conn.query_row(
            &format!(
                "SELECT {TIME_OFF_COLUMNS} FROM time_off
                 WHERE employee_id = ?1 AND status != 'rejected'
                   AND date_from <= ?2 AND date_to >= ?3
                 LIMIT 1"
            ),
            params![employee_id, to_text, from_text],
            time_off_parts,
        )
    };

    match result {
        Ok(parts) => Ok(Some(time_off_from_parts(parts)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Counts time-off requests still awaiting a manager decision.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_pending_time_off(conn: &Connection) -> Result<i64, PersistenceError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM time_off WHERE status = 'pending'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
