// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use rota::CoreError;
use rota_domain::DomainError;
use rota_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These represent the API contract; the server crate maps each
/// variant onto an HTTP status. Conflict variants carry a rendered
/// detail string naming the specific clash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The user does not have permission for this action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The operation is not valid in the entity's current state.
    InvalidState {
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    NotFound {
        /// The type of resource that was not found.
        resource: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The candidate shift overlaps an existing one.
    ScheduleConflict {
        /// Rendered detail naming the clashing shift.
        message: String,
    },
    /// Approved time off blocks the shift date.
    TimeOffConflict {
        /// Rendered detail naming the blocking request.
        message: String,
    },
    /// The shift already has an active release request.
    DuplicateRelease {
        /// Rendered detail naming the existing request.
        message: String,
    },
    /// The employee already has an overlapping time-off request.
    DuplicateTimeOff {
        /// Rendered detail naming the existing request.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidState { message } => write!(f, "Invalid state: {message}"),
            Self::NotFound { resource, message } => {
                write!(f, "{resource} not found: {message}")
            }
            Self::ScheduleConflict { message }
            | Self::TimeOffConflict { message }
            | Self::DuplicateRelease { message }
            | Self::DuplicateTimeOff { message } => write!(f, "{message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(message) => Self::NotFound {
                resource: String::from("Record"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::InvalidReleaseTransition { .. } => Self::InvalidState {
                message: err.to_string(),
            },
            DomainError::InvalidTimeRange { .. } | DomainError::TimeParseError { .. } => {
                Self::InvalidInput {
                    field: String::from("time"),
                    message: err.to_string(),
                }
            }
            DomainError::InvalidDateRange { .. } | DomainError::DateParseError { .. } => {
                Self::InvalidInput {
                    field: String::from("date"),
                    message: err.to_string(),
                }
            }
            DomainError::InvalidName(_) => Self::InvalidInput {
                field: String::from("name"),
                message: err.to_string(),
            },
            DomainError::InvalidMaxWeeklyHours { .. } => Self::InvalidInput {
                field: String::from("max_weekly_hours"),
                message: err.to_string(),
            },
            DomainError::InvalidShiftStatus { .. }
            | DomainError::InvalidTimeOffType { .. }
            | DomainError::InvalidTimeOffStatus { .. }
            | DomainError::InvalidReleaseStatus { .. } => Self::InvalidInput {
                field: String::from("status"),
                message: err.to_string(),
            },
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DomainViolation(domain_err) => domain_err.into(),
            CoreError::ScheduleConflict { .. } => Self::ScheduleConflict {
                message: err.to_string(),
            },
            CoreError::TimeOffConflict { .. } => Self::TimeOffConflict {
                message: err.to_string(),
            },
            CoreError::DuplicateActiveRelease { .. } => Self::DuplicateRelease {
                message: err.to_string(),
            },
            CoreError::NotShiftOwner { .. }
            | CoreError::ShiftNotReleasable { .. }
            | CoreError::SelfClaim
            | CoreError::MissingClaimer { .. } => Self::InvalidState {
                message: err.to_string(),
            },
            CoreError::Forbidden {
                action,
                requirement,
            } => Self::Unauthorized {
                action: action.to_string(),
                required_role: requirement.to_string(),
            },
        }
    }
}
