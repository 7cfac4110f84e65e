// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Release request status tracking and transition logic.
//!
//! A release request moves a shift from its owning employee through
//! release, optional claim by another employee, to a manager-approved
//! transfer or rejection. Transitions are actor-initiated only; the
//! system never advances status based on time alone, so an unclaimed
//! release simply stays where it is and the original owner keeps the
//! shift.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of a release request.
///
/// Lifecycle: `pending → {accepted, rejected, cancelled}`,
/// `accepted → {approved, rejected, cancelled}`. `approved`,
/// `rejected`, and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseStatus {
    /// Released by the owner, waiting for someone to claim it.
    #[default]
    Pending,
    /// Claimed by another employee, waiting for manager approval.
    Accepted,
    /// Manager approved; the shift was transferred to the claimer.
    Approved,
    /// Manager declined; the original owner keeps the shift.
    Rejected,
    /// Withdrawn by the requester or a manager.
    Cancelled,
}

impl ReleaseStatus {
    /// Returns the string representation used for persistence and
    /// API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if this status is terminal (no further
    /// transitions are permitted).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Cancelled)
    }

    /// Returns true if this status counts as an active release.
    ///
    /// At most one active request may exist per shift; this is the
    /// double-release guard.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    /// Validates a transition from this status to another.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReleaseTransition` if the
    /// transition is not allowed by the lifecycle rules.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidReleaseTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from a terminal state".to_string(),
            });
        }

        let valid = match self {
            Self::Pending => matches!(
                new_status,
                Self::Accepted | Self::Rejected | Self::Cancelled
            ),
            Self::Accepted => matches!(
                new_status,
                Self::Approved | Self::Rejected | Self::Cancelled
            ),
            Self::Approved | Self::Rejected | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidReleaseTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by release lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for ReleaseStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidReleaseStatus {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The record of one release/claim/approve workflow.
///
/// # Invariants
///
/// - The requester must own the referenced shift at release time.
/// - At most one request per shift may be in an active status
///   (`pending` or `accepted`) at a time.
/// - Only the `approved` transition ever mutates the referenced
///   shift's owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRequest {
    /// The canonical numeric identifier assigned by the database.
    pub id: Option<i64>,
    /// The shift being released.
    pub shift_id: i64,
    /// The releasing employee (must own the shift at release time).
    pub requester_id: i64,
    /// The claiming employee, set when the request is claimed.
    pub claimer_id: Option<i64>,
    /// Current workflow status.
    pub status: ReleaseStatus,
    /// Free-text message from the requester.
    pub message: String,
    /// Free-text note recorded by the manager on approve/reject.
    pub manager_note: Option<String>,
}

impl ReleaseRequest {
    /// Creates a new pending `ReleaseRequest` without a persisted ID.
    #[must_use]
    pub const fn new(shift_id: i64, requester_id: i64, message: String) -> Self {
        Self {
            id: None,
            shift_id,
            requester_id,
            claimer_id: None,
            status: ReleaseStatus::Pending,
            message,
            manager_note: None,
        }
    }
}
