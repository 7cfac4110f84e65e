// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation shared by every write path.

use crate::error::DomainError;
use time::{Date, Time};

/// Validates that a shift's start time is strictly before its end
/// time.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeRange` if `start >= end`.
pub fn validate_time_range(start: Time, end: Time) -> Result<(), DomainError> {
    if start < end {
        Ok(())
    } else {
        Err(DomainError::InvalidTimeRange { start, end })
    }
}

/// Validates that a time-off range runs forward: `date_from` must be
/// on or before `date_to` (both inclusive).
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `date_from > date_to`.
pub fn validate_date_range(date_from: Date, date_to: Date) -> Result<(), DomainError> {
    if date_from <= date_to {
        Ok(())
    } else {
        Err(DomainError::InvalidDateRange { date_from, date_to })
    }
}

/// Validates an employee name: non-empty after trimming.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is blank.
pub fn validate_employee_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "name must not be empty",
        )));
    }
    Ok(())
}

/// Validates a maximum weekly hours value: positive and finite.
///
/// # Errors
///
/// Returns `DomainError::InvalidMaxWeeklyHours` for zero, negative,
/// NaN, or infinite values.
pub fn validate_max_weekly_hours(hours: f64) -> Result<(), DomainError> {
    if hours.is_finite() && hours > 0.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidMaxWeeklyHours { hours })
    }
}
