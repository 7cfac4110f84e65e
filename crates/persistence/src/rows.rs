// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row decoding between stored text columns and domain types.
//!
//! Query closures return raw column tuples; conversion into domain
//! types happens outside the closure so decode failures surface as
//! `PersistenceError::DataCorruption` instead of being shoehorned
//! into `rusqlite::Error`.

use time::macros::format_description;
use time::{Date, Time};

use rota_domain::{
    Employee, ReleaseRequest, ReleaseStatus, Shift, ShiftStatus, Shop, TimeOffRequest,
    TimeOffStatus, TimeOffType,
};

use crate::error::PersistenceError;

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Parses a stored `YYYY-MM-DD` column value.
///
/// # Errors
///
/// Returns `PersistenceError::DataCorruption` if the value does not
/// parse.
pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|e| PersistenceError::DataCorruption(format!("invalid date '{value}': {e}")))
}

/// Parses a stored `HH:MM:SS` column value.
///
/// # Errors
///
/// Returns `PersistenceError::DataCorruption` if the value does not
/// parse.
pub fn parse_time(value: &str) -> Result<Time, PersistenceError> {
    Time::parse(value, TIME_FORMAT)
        .map_err(|e| PersistenceError::DataCorruption(format!("invalid time '{value}': {e}")))
}

/// Formats a date for storage as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `PersistenceError::DataCorruption` on a formatting failure.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::DataCorruption(format!("cannot format date: {e}")))
}

/// Formats a time for storage as `HH:MM:SS`.
///
/// # Errors
///
/// Returns `PersistenceError::DataCorruption` on a formatting failure.
pub fn format_time(time: Time) -> Result<String, PersistenceError> {
    time.format(TIME_FORMAT)
        .map_err(|e| PersistenceError::DataCorruption(format!("cannot format time: {e}")))
}

/// Raw column tuple for one `shifts` row.
pub type ShiftParts = (
    i64,
    Option<i64>,
    i64,
    String,
    String,
    String,
    String,
    String,
    i64,
);

/// Converts a raw `shifts` row into a domain `Shift`.
///
/// # Errors
///
/// Returns `PersistenceError::DataCorruption` if any stored column
/// fails to decode.
pub fn shift_from_parts(parts: ShiftParts) -> Result<Shift, PersistenceError> {
    let (id, employee_id, shop_id, date, start, end, status, notes, is_unassigned) = parts;
    Ok(Shift {
        id: Some(id),
        employee_id,
        shop_id,
        date: parse_date(&date)?,
        start: parse_time(&start)?,
        end: parse_time(&end)?,
        status: status.parse::<ShiftStatus>()?,
        notes,
        unassigned: is_unassigned != 0,
    })
}

/// Raw column tuple for one `time_off` row.
pub type TimeOffParts = (i64, i64, String, String, String, String, String);

/// Converts a raw `time_off` row into a domain `TimeOffRequest`.
///
/// # Errors
///
/// Returns `PersistenceError::DataCorruption` if any stored column
/// fails to decode.
pub fn time_off_from_parts(parts: TimeOffParts) -> Result<TimeOffRequest, PersistenceError> {
    let (id, employee_id, date_from, date_to, kind, reason, status) = parts;
    Ok(TimeOffRequest {
        id: Some(id),
        employee_id,
        date_from: parse_date(&date_from)?,
        date_to: parse_date(&date_to)?,
        kind: kind.parse::<TimeOffType>()?,
        reason,
        status: status.parse::<TimeOffStatus>()?,
    })
}

/// Raw column tuple for one `release_requests` row.
pub type ReleaseParts = (i64, i64, i64, Option<i64>, String, String, Option<String>);

/// Converts a raw `release_requests` row into a domain
/// `ReleaseRequest`.
///
/// # Errors
///
/// Returns `PersistenceError::DataCorruption` if the stored status
/// fails to decode.
pub fn release_from_parts(parts: ReleaseParts) -> Result<ReleaseRequest, PersistenceError> {
    let (id, shift_id, requester_id, claimer_id, status, message, manager_note) = parts;
    Ok(ReleaseRequest {
        id: Some(id),
        shift_id,
        requester_id,
        claimer_id,
        status: status.parse::<ReleaseStatus>()?,
        message,
        manager_note,
    })
}

/// Converts a raw `employees` row into a domain `Employee`.
#[must_use]
pub fn employee_from_parts(
    parts: (i64, String, Option<String>, Option<String>, f64, i64, Option<i64>),
) -> Employee {
    let (id, name, phone, role_label, max_weekly_hours, is_active, user_id) = parts;
    Employee {
        id: Some(id),
        name,
        phone,
        role_label,
        max_weekly_hours,
        active: is_active != 0,
        user_id,
    }
}

/// Converts a raw `shops` row into a domain `Shop`.
#[must_use]
pub fn shop_from_parts(parts: (i64, String, String, i64)) -> Shop {
    let (id, name, color, is_active) = parts;
    Shop {
        id: Some(id),
        name,
        color,
        active: is_active != 0,
    }
}

/// One `users` row, as stored. The password hash stays here; it never
/// crosses into the domain types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    /// The user account ID.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
    /// Stored role string (`manager` or `staff`).
    pub role: String,
    /// Linked employee record, if any.
    pub employee_id: Option<i64>,
}

/// The join of a session row with its user, returned by token lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUserRow {
    /// The user account ID.
    pub user_id: i64,
    /// Login name.
    pub username: String,
    /// Stored role string (`manager` or `staff`).
    pub role: String,
    /// Linked employee record, if any.
    pub employee_id: Option<i64>,
    /// Expiry as unix epoch seconds.
    pub expires_at: i64,
}
