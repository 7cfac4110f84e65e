// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, Result as SqliteResult, params};

use rota_domain::{ReleaseRequest, ReleaseStatus};

use crate::error::PersistenceError;
use crate::rows::{ReleaseParts, release_from_parts};

const RELEASE_COLUMNS: &str =
    "request_id, shift_id, requester_id, claimer_id, status, message, manager_note";

fn release_parts(row: &rusqlite::Row<'_>) -> SqliteResult<ReleaseParts> {
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

/// Retrieves a release request by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the request does not
/// exist.
pub fn get_release(conn: &Connection, request_id: i64) -> Result<ReleaseRequest, PersistenceError> {
    let parts = conn
        .query_row(
            &format!("SELECT {RELEASE_COLUMNS} FROM release_requests WHERE request_id = ?1"),
            params![request_id],
            release_parts,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                PersistenceError::NotFound(format!("Release request {request_id} not found"))
            }
            other => other.into(),
        })?;

    release_from_parts(parts)
}

/// Finds the active (`pending` or `accepted`) request for a shift.
///
/// The schema permits many rows per shift across history; the
/// at-most-one-active invariant is what this lookup enforces at write
/// time.
///
/// # Errors
///
/// Returns an error if the query fails or the row fails to decode.
pub fn find_active_release_for_shift(
    conn: &Connection,
    shift_id: i64,
) -> Result<Option<ReleaseRequest>, PersistenceError> {
    let result: SqliteResult<ReleaseParts> = conn.query_row(
        &format!(
            "SELECT {RELEASE_COLUMNS} FROM release_requests
             WHERE shift_id = ?1 AND status IN ('pending', 'accepted')
             LIMIT 1"
        ),
        params![shift_id],
        release_parts,
    );

    match result {
        Ok(parts) => Ok(Some(release_from_parts(parts)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists release requests, newest first, optionally filtered by
/// status.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn list_releases(
    conn: &Connection,
    status: Option<ReleaseStatus>,
) -> Result<Vec<ReleaseRequest>, PersistenceError> {
    let mut requests: Vec<ReleaseRequest> = Vec::new();

    if let Some(status) = status {
        let mut stmt = conn.prepare(&format!(
            "SELECT {RELEASE_COLUMNS} FROM release_requests
             WHERE status = ?1 ORDER BY request_id DESC"
        ))?;
        let rows = stmt.query_map(params![status.as_str()], release_parts)?;
        for row in rows {
            requests.push(release_from_parts(row?)?);
        }
    } else {
        let mut stmt = conn.prepare(&format!(
            "SELECT {RELEASE_COLUMNS} FROM release_requests ORDER BY request_id DESC"
        ))?;
        let rows = stmt.query_map([], release_parts)?;
        for row in rows {
            requests.push(release_from_parts(row?)?);
        }
    }

    Ok(requests)
}

/// Counts requests in an active status (`pending` or `accepted`).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_active_releases(conn: &Connection) -> Result<i64, PersistenceError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM release_requests WHERE status IN ('pending', 'accepted')",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
