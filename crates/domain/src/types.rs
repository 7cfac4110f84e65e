// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Time};

/// Lifecycle status of a shift.
///
/// Shifts are never hard-deleted; cancellation is a soft status so
/// history referencing the shift stays intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// The shift is on the schedule.
    #[default]
    Scheduled,
    /// The shift was worked.
    Completed,
    /// The shift was called off. Cancelled shifts never participate
    /// in overlap detection.
    Cancelled,
}

impl ShiftStatus {
    /// Returns the string representation used for persistence and
    /// API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ShiftStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidShiftStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of a time-off request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOffType {
    /// Planned vacation.
    Vacation,
    /// General unavailability.
    Unavailable,
    /// Sick leave.
    Sick,
    /// Personal day.
    Personal,
}

impl TimeOffType {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vacation => "vacation",
            Self::Unavailable => "unavailable",
            Self::Sick => "sick",
            Self::Personal => "personal",
        }
    }

    /// Returns the human-readable label for conflict messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Vacation => "Vacation",
            Self::Unavailable => "Unavailable",
            Self::Sick => "Sick Leave",
            Self::Personal => "Personal",
        }
    }
}

impl FromStr for TimeOffType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vacation" => Ok(Self::Vacation),
            "unavailable" => Ok(Self::Unavailable),
            "sick" => Ok(Self::Sick),
            "personal" => Ok(Self::Personal),
            _ => Err(DomainError::InvalidTimeOffType {
                value: s.to_string(),
            }),
        }
    }
}

/// Approval status of a time-off request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeOffStatus {
    /// Awaiting a manager decision.
    #[default]
    Pending,
    /// Approved; the employee must not be scheduled in the range.
    Approved,
    /// Rejected; the range no longer blocks anything.
    Rejected,
}

impl TimeOffStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for TimeOffStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidTimeOffStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// An employee who can be scheduled for shifts.
///
/// Employees are soft-deleted (`active = false`), never removed, so
/// shifts and requests referencing them keep their history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the employee has not been persisted yet.
    pub id: Option<i64>,
    /// The employee's display name.
    pub name: String,
    /// Contact phone number, if known.
    pub phone: Option<String>,
    /// Free-text role label (e.g. "barista"). Not an authorization
    /// role; see the identity context for that.
    pub role_label: Option<String>,
    /// The maximum hours this employee should work per week.
    pub max_weekly_hours: f64,
    /// Whether the employee is active. Inactive employees are hidden
    /// from listings but retained for history.
    pub active: bool,
    /// Zero-or-one linked user account for login.
    pub user_id: Option<i64>,
}

impl Employee {
    /// Creates a new `Employee` without a persisted ID.
    #[must_use]
    pub const fn new(
        name: String,
        phone: Option<String>,
        role_label: Option<String>,
        max_weekly_hours: f64,
    ) -> Self {
        Self {
            id: None,
            name,
            phone,
            role_label,
            max_weekly_hours,
            active: true,
            user_id: None,
        }
    }
}

/// A shop (location) that shifts are scheduled at.
///
/// Static reference data; the display color is carried through for
/// the calendar UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// The canonical numeric identifier assigned by the database.
    pub id: Option<i64>,
    /// The shop's display name.
    pub name: String,
    /// Display color as a hex string (e.g. "#6366f1").
    pub color: String,
    /// Whether the shop is active.
    pub active: bool,
}

/// A scheduled work interval for one employee at one shop on one date.
///
/// # Invariants
///
/// - `start < end` (validated before every write).
/// - For a given employee and date, no two shifts with status other
///   than `Cancelled` may have overlapping `[start, end)` intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the shift has not been persisted yet.
    pub id: Option<i64>,
    /// The owning employee. `None` is a distinct valid state for an
    /// open (unassigned) shift awaiting a worker.
    pub employee_id: Option<i64>,
    /// The shop this shift is worked at.
    pub shop_id: i64,
    /// The calendar date of the shift.
    pub date: Date,
    /// Start of the interval (inclusive).
    pub start: Time,
    /// End of the interval (exclusive).
    pub end: Time,
    /// Lifecycle status.
    pub status: ShiftStatus,
    /// Free-text notes.
    pub notes: String,
    /// Whether this is an open shift generated without an owner.
    pub unassigned: bool,
}

impl Shift {
    /// Creates a new scheduled `Shift` without a persisted ID.
    #[must_use]
    pub const fn new(
        employee_id: Option<i64>,
        shop_id: i64,
        date: Date,
        start: Time,
        end: Time,
        notes: String,
    ) -> Self {
        Self {
            id: None,
            employee_id,
            shop_id,
            date,
            start,
            end,
            status: ShiftStatus::Scheduled,
            notes,
            unassigned: false,
        }
    }

    /// Creates a new open (unassigned) shift without a persisted ID.
    #[must_use]
    pub const fn new_open(shop_id: i64, date: Date, start: Time, end: Time, notes: String) -> Self {
        Self {
            id: None,
            employee_id: None,
            shop_id,
            date,
            start,
            end,
            status: ShiftStatus::Scheduled,
            notes,
            unassigned: true,
        }
    }

    /// Returns the shift length in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        crate::overlap::minutes_between(self.start, self.end)
    }
}

/// A request for time away from scheduling.
///
/// # Invariants
///
/// - `date_from <= date_to` (both inclusive).
/// - An employee may not have two non-rejected requests with
///   overlapping date ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    /// The canonical numeric identifier assigned by the database.
    pub id: Option<i64>,
    /// The employee requesting time off.
    pub employee_id: i64,
    /// First day of the range (inclusive).
    pub date_from: Date,
    /// Last day of the range (inclusive).
    pub date_to: Date,
    /// Category of the request.
    pub kind: TimeOffType,
    /// Free-text reason.
    pub reason: String,
    /// Approval status.
    pub status: TimeOffStatus,
}

impl TimeOffRequest {
    /// Creates a new pending `TimeOffRequest` without a persisted ID.
    #[must_use]
    pub const fn new(
        employee_id: i64,
        date_from: Date,
        date_to: Date,
        kind: TimeOffType,
        reason: String,
    ) -> Self {
        Self {
            id: None,
            employee_id,
            date_from,
            date_to,
            kind,
            reason,
            status: TimeOffStatus::Pending,
        }
    }

    /// Returns whether the inclusive date range contains `date`.
    #[must_use]
    pub fn covers(&self, date: Date) -> bool {
        self.date_from <= date && date <= self.date_to
    }

    /// Returns whether the inclusive date range intersects
    /// `[from, to]`.
    #[must_use]
    pub fn overlaps_range(&self, from: Date, to: Date) -> bool {
        self.date_from <= to && self.date_to >= from
    }

    /// Returns whether this request blocks scheduling: only approved
    /// requests do.
    #[must_use]
    pub fn blocks_scheduling(&self) -> bool {
        self.status == TimeOffStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_shift_status_string_round_trip() {
        for status in [
            ShiftStatus::Scheduled,
            ShiftStatus::Completed,
            ShiftStatus::Cancelled,
        ] {
            let parsed: ShiftStatus = status.as_str().parse().expect("valid status string");
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_invalid_shift_status_string() {
        assert!("deleted".parse::<ShiftStatus>().is_err());
    }

    #[test]
    fn test_time_off_type_round_trip() {
        for kind in [
            TimeOffType::Vacation,
            TimeOffType::Unavailable,
            TimeOffType::Sick,
            TimeOffType::Personal,
        ] {
            let parsed: TimeOffType = kind.as_str().parse().expect("valid type string");
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_time_off_covers_inclusive_bounds() {
        let request = TimeOffRequest::new(
            1,
            date!(2026 - 01 - 05),
            date!(2026 - 01 - 09),
            TimeOffType::Vacation,
            String::new(),
        );

        assert!(request.covers(date!(2026 - 01 - 05)));
        assert!(request.covers(date!(2026 - 01 - 07)));
        assert!(request.covers(date!(2026 - 01 - 09)));
        assert!(!request.covers(date!(2026 - 01 - 04)));
        assert!(!request.covers(date!(2026 - 01 - 10)));
    }

    #[test]
    fn test_time_off_range_overlap() {
        let request = TimeOffRequest::new(
            1,
            date!(2026 - 01 - 05),
            date!(2026 - 01 - 09),
            TimeOffType::Sick,
            String::new(),
        );

        assert!(request.overlaps_range(date!(2026 - 01 - 09), date!(2026 - 01 - 12)));
        assert!(request.overlaps_range(date!(2026 - 01 - 01), date!(2026 - 01 - 05)));
        assert!(!request.overlaps_range(date!(2026 - 01 - 10), date!(2026 - 01 - 12)));
    }

    #[test]
    fn test_only_approved_time_off_blocks() {
        let mut request = TimeOffRequest::new(
            1,
            date!(2026 - 01 - 05),
            date!(2026 - 01 - 05),
            TimeOffType::Personal,
            String::new(),
        );

        assert!(!request.blocks_scheduling());
        request.status = TimeOffStatus::Approved;
        assert!(request.blocks_scheduling());
        request.status = TimeOffStatus::Rejected;
        assert!(!request.blocks_scheduling());
    }
}
