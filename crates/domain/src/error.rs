// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, Time};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A shift's start time is not strictly before its end time.
    InvalidTimeRange {
        /// The offending start time.
        start: Time,
        /// The offending end time.
        end: Time,
    },
    /// A time-off request's start date is after its end date.
    InvalidDateRange {
        /// The offending start date.
        date_from: Date,
        /// The offending end date.
        date_to: Date,
    },
    /// Employee name is empty or invalid.
    InvalidName(String),
    /// Maximum weekly hours must be a positive, finite value.
    InvalidMaxWeeklyHours {
        /// The invalid value.
        hours: f64,
    },
    /// Shift status string is not a recognized status.
    InvalidShiftStatus {
        /// The unrecognized value.
        status: String,
    },
    /// Time-off type string is not a recognized type.
    InvalidTimeOffType {
        /// The unrecognized value.
        value: String,
    },
    /// Time-off status string is not a recognized status.
    InvalidTimeOffStatus {
        /// The unrecognized value.
        value: String,
    },
    /// Release request status string is not a recognized status.
    InvalidReleaseStatus {
        /// The unrecognized value.
        value: String,
    },
    /// A release request transition was attempted that the status
    /// lifecycle does not permit.
    InvalidReleaseTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a time from a string.
    TimeParseError {
        /// The invalid time string.
        time_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeRange { start, end } => {
                write!(f, "Start time {start} must be before end time {end}")
            }
            Self::InvalidDateRange { date_from, date_to } => {
                write!(
                    f,
                    "Start date {date_from} must be on or before end date {date_to}"
                )
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidMaxWeeklyHours { hours } => {
                write!(f, "Invalid maximum weekly hours: {hours}")
            }
            Self::InvalidShiftStatus { status } => {
                write!(f, "Invalid shift status: {status}")
            }
            Self::InvalidTimeOffType { value } => {
                write!(f, "Invalid time-off type: {value}")
            }
            Self::InvalidTimeOffStatus { value } => {
                write!(f, "Invalid time-off status: {value}")
            }
            Self::InvalidReleaseStatus { value } => {
                write!(f, "Invalid release request status: {value}")
            }
            Self::InvalidReleaseTransition { from, to, reason } => {
                write!(
                    f,
                    "Cannot transition release request from '{from}' to '{to}': {reason}"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::TimeParseError { time_string, error } => {
                write!(f, "Failed to parse time '{time_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
