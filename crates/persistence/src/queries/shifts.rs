// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, Result as SqliteResult, params};
use time::{Date, Time};

use rota_domain::Shift;

use crate::error::PersistenceError;
use crate::rows::{ShiftParts, format_date, format_time, shift_from_parts};

const SHIFT_COLUMNS: &str = "shift_id, employee_id, shop_id, shift_date, start_time, end_time, \
                             status, notes, is_unassigned";

fn shift_parts(row: &rusqlite::Row<'_>) -> SqliteResult<ShiftParts> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

/// Retrieves a shift by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the shift does not exist.
pub fn get_shift(conn: &Connection, shift_id: i64) -> Result<Shift, PersistenceError> {
    let parts = conn
        .query_row(
            &format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE shift_id = ?1"),
            params![shift_id],
            shift_parts,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                PersistenceError::NotFound(format!("Shift {shift_id} not found"))
            }
            other => other.into(),
        })?;

    shift_from_parts(parts)
}

/// Lists all shifts with dates in `[from, to]`, ordered by date and
/// start time.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn list_shifts_in_range(
    conn: &Connection,
    from: Date,
    to: Date,
) -> Result<Vec<Shift>, PersistenceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SHIFT_COLUMNS} FROM shifts
         WHERE shift_date >= ?1 AND shift_date <= ?2
         ORDER BY shift_date, start_time, shift_id"
    ))?;

    let rows = stmt.query_map(params![format_date(from)?, format_date(to)?], shift_parts)?;

    let mut shifts: Vec<Shift> = Vec::new();
    for row in rows {
        shifts.push(shift_from_parts(row?)?);
    }
    Ok(shifts)
}

/// Finds the first non-cancelled shift for `employee_id` on `date`
/// whose `[start, end)` interval intersects the candidate interval.
///
/// Touching endpoints do not match: the comparison is strict in both
/// directions. `exclude_shift_id` omits the shift being edited.
///
/// # Errors
///
/// Returns an error if the query fails or the row fails to decode.
pub fn find_overlapping_shift(
    conn: &Connection,
    employee_id: i64,
    date: Date,
    start: Time,
    end: Time,
    exclude_shift_id: Option<i64>,
) -> Result<Option<Shift>, PersistenceError> {
    let date_text: String = format_date(date)?;
    let start_text: String = format_time(start)?;
    let end_text: String = format_time(end)?;

    let result: SqliteResult<ShiftParts> = if let Some(exclude) = exclude_shift_id {
        conn.query_row(
            &format!(
                "SELECT {SHIFT_COLUMNS} FROM shifts
                 WHERE employee_id = ?1 AND shift_date = ?2
                   AND status != 'cancelled'
                   AND start_time < ?3 AND end_time > ?4
                   AND shift_id != ?5
                 ORDER BY start_time LIMIT 1"
            ),
            params![employee_id, date_text, end_text, start_text, exclude],
            shift_parts,
        )
    } else {
        conn.query_row(
            &format!(
                "SELECT {SHIFT_COLUMNS} FROM shifts
                 WHERE employee_id = ?1 AND shift_date = ?2
                   AND status != 'cancelled'
                   AND start_time < ?3 AND end_time > ?4
                 ORDER BY start_time LIMIT 1"
            ),
            params![employee_id, date_text, end_text, start_text],
            shift_parts,
        )
    };

    match result {
        Ok(parts) => Ok(Some(shift_from_parts(parts)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
