// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::{DomainError, Shift, ShiftStatus, TimeOffRequest};

/// Errors that can occur while evaluating a scheduling or workflow
/// decision.
///
/// Conflict variants carry the clashing record so the boundary layer
/// can render the specific clash, not just "conflict".
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated (bad field, invalid transition).
    DomainViolation(DomainError),
    /// The candidate shift overlaps an existing non-cancelled shift
    /// for the same employee and date.
    ScheduleConflict {
        /// The existing shift that clashes.
        conflicting: Shift,
    },
    /// The employee has approved time off covering the shift date.
    /// Overridable by the caller via the explicit `force` flag.
    TimeOffConflict {
        /// The blocking time-off request.
        blocking: TimeOffRequest,
    },
    /// The shift already has a release request in an active status.
    DuplicateActiveRelease {
        /// The existing active request's ID.
        request_id: i64,
    },
    /// The requester does not currently own the shift being released.
    NotShiftOwner {
        /// The shift in question.
        shift_id: i64,
        /// The employee who attempted the release.
        employee_id: i64,
    },
    /// The shift is not in a releasable status.
    ShiftNotReleasable {
        /// The shift in question.
        shift_id: i64,
        /// Its current status.
        status: ShiftStatus,
    },
    /// An employee attempted to claim their own released shift.
    SelfClaim,
    /// An accepted request has no claimer recorded. This indicates a
    /// corrupted record; approval cannot determine a transfer target.
    MissingClaimer {
        /// The request in question.
        request_id: i64,
    },
    /// The identity is not permitted to perform this operation.
    Forbidden {
        /// The operation that was attempted.
        action: &'static str,
        /// What the operation requires.
        requirement: &'static str,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ScheduleConflict { conflicting } => {
                write!(
                    f,
                    "Schedule overlap detected with shift {} ({} - {})",
                    conflicting.id.unwrap_or(-1),
                    conflicting.start,
                    conflicting.end
                )
            }
            Self::TimeOffConflict { blocking } => {
                write!(
                    f,
                    "Approved time off ({}) from {} to {} blocks scheduling",
                    blocking.kind.label(),
                    blocking.date_from,
                    blocking.date_to
                )
            }
            Self::DuplicateActiveRelease { request_id } => {
                write!(
                    f,
                    "This shift has already been released (active request {request_id})"
                )
            }
            Self::NotShiftOwner {
                shift_id,
                employee_id,
            } => {
                write!(
                    f,
                    "Shift {shift_id} does not belong to employee {employee_id}"
                )
            }
            Self::ShiftNotReleasable { shift_id, status } => {
                write!(
                    f,
                    "Shift {shift_id} cannot be released from status '{status}'"
                )
            }
            Self::SelfClaim => {
                write!(f, "You cannot claim your own released shift")
            }
            Self::MissingClaimer { request_id } => {
                write!(f, "Release request {request_id} has no claimer recorded")
            }
            Self::Forbidden {
                action,
                requirement,
            } => {
                write!(f, "Not permitted: '{action}' requires {requirement}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
