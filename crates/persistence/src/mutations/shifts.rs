// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, params};
use rota_domain::{Shift, ShiftStatus};

use crate::error::PersistenceError;
use crate::rows::{format_date, format_time};

/// Inserts a shift and returns the assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_shift(conn: &Connection, shift: &Shift) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO shifts
             (employee_id, shop_id, shift_date, start_time, end_time, status, notes, is_unassigned)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            shift.employee_id,
            shift.shop_id,
            format_date(shift.date)?,
            format_time(shift.start)?,
            format_time(shift.end)?,
            shift.status.as_str(),
            shift.notes,
            i64::from(shift.unassigned),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Updates every mutable column of a shift.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the shift does not exist.
pub fn update_shift(conn: &Connection, shift_id: i64, shift: &Shift) -> Result<(), PersistenceError> {
    let changed = conn.execute(
        "UPDATE shifts
         SET employee_id = ?1, shop_id = ?2, shift_date = ?3, start_time = ?4,
             end_time = ?5, status = ?6, notes = ?7, is_unassigned = ?8
         WHERE shift_id = ?9",
        params![
            shift.employee_id,
            shift.shop_id,
            format_date(shift.date)?,
            format_time(shift.start)?,
            format_time(shift.end)?,
            shift.status.as_str(),
            shift.notes,
            i64::from(shift.unassigned),
            shift_id,
        ],
    )?;

    if changed == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Shift {shift_id} not found"
        )));
    }
    Ok(())
}

/// Sets a shift's lifecycle status.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the shift does not exist.
pub fn set_shift_status(
    conn: &Connection,
    shift_id: i64,
    status: ShiftStatus,
) -> Result<(), PersistenceError> {
    let changed = conn.execute(
        "UPDATE shifts SET status = ?1 WHERE shift_id = ?2",
        params![status.as_str(), shift_id],
    )?;

    if changed == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Shift {shift_id} not found"
        )));
    }
    Ok(())
}

/// Transfers a shift to a new owner. This is only ever called from
/// the release-approval path.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the shift does not exist.
pub fn set_shift_owner(
    conn: &Connection,
    shift_id: i64,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    let changed = conn.execute(
        "UPDATE shifts SET employee_id = ?1, is_unassigned = 0 WHERE shift_id = ?2",
        params![employee_id, shift_id],
    )?;

    if changed == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Shift {shift_id} not found"
        )));
    }
    Ok(())
}
