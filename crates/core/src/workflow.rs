// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The release/claim/approve workflow decisions.
//!
//! Each function takes the identity performing the operation plus the
//! already-loaded records it governs, checks every guard, and returns
//! the updated record(s) for the caller to persist. Nothing here
//! touches a store; the caller runs each operation inside one
//! immediate transaction so the guard and the write are serialized.
//!
//! Ownership of the shift changes in exactly one place: the
//! `approve` transition. Reject and cancel only move the request's
//! status; the original owner keeps the shift.

use crate::error::CoreError;
use crate::identity::Identity;
use rota_domain::{ReleaseRequest, ReleaseStatus, Shift, ShiftStatus};

/// The result of approving a claimed release: the updated request and
/// the employee the shift now belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedTransfer {
    /// The request, now in `approved` status.
    pub request: ReleaseRequest,
    /// The claimer, who becomes the shift's new owner.
    pub new_owner_id: i64,
}

/// Releases a shift: creates a new pending request for it.
///
/// # Errors
///
/// - `CoreError::Forbidden` if `identity` may not act for
///   `requester_id`.
/// - `CoreError::ShiftNotReleasable` if the shift is not in
///   `scheduled` status.
/// - `CoreError::NotShiftOwner` if the requester does not currently
///   own the shift.
/// - `CoreError::DuplicateActiveRelease` if the shift already has a
///   request in `pending` or `accepted` status.
pub fn release(
    identity: &Identity,
    shift: &Shift,
    requester_id: i64,
    active_request: Option<&ReleaseRequest>,
    message: String,
) -> Result<ReleaseRequest, CoreError> {
    if !identity.acts_for(requester_id) {
        return Err(CoreError::Forbidden {
            action: "release shift",
            requirement: "manager role or ownership of the shift",
        });
    }

    let shift_id = shift.id.unwrap_or(-1);

    if shift.status != ShiftStatus::Scheduled {
        return Err(CoreError::ShiftNotReleasable {
            shift_id,
            status: shift.status,
        });
    }

    if shift.employee_id != Some(requester_id) {
        return Err(CoreError::NotShiftOwner {
            shift_id,
            employee_id: requester_id,
        });
    }

    if let Some(existing) = active_request {
        return Err(CoreError::DuplicateActiveRelease {
            request_id: existing.id.unwrap_or(-1),
        });
    }

    Ok(ReleaseRequest::new(shift_id, requester_id, message))
}

/// Claims a pending release on behalf of `claimer_id`.
///
/// # Errors
///
/// - `CoreError::Forbidden` if `identity` may not act for
///   `claimer_id`.
/// - `CoreError::SelfClaim` if the claimer is the requester.
/// - `CoreError::DomainViolation` if the request is not in a status
///   that permits claiming.
pub fn claim(
    identity: &Identity,
    request: &ReleaseRequest,
    claimer_id: i64,
) -> Result<ReleaseRequest, CoreError> {
    if !identity.acts_for(claimer_id) {
        return Err(CoreError::Forbidden {
            action: "claim shift",
            requirement: "manager role or acting as the claiming employee",
        });
    }

    if claimer_id == request.requester_id {
        return Err(CoreError::SelfClaim);
    }

    request.status.validate_transition(ReleaseStatus::Accepted)?;

    let mut updated = request.clone();
    updated.status = ReleaseStatus::Accepted;
    updated.claimer_id = Some(claimer_id);
    Ok(updated)
}

/// Approves a claimed release, transferring the shift to the claimer.
///
/// This is the only transition that changes shift ownership. The
/// caller writes both the returned request and the shift's new owner
/// in the same transaction.
///
/// # Errors
///
/// - `CoreError::Forbidden` if `identity` is not a manager.
/// - `CoreError::DomainViolation` if the request is not in `accepted`
///   status (a second approval of the same request fails here).
/// - `CoreError::MissingClaimer` if the accepted request has no
///   claimer recorded.
pub fn approve(
    identity: &Identity,
    request: &ReleaseRequest,
    manager_note: Option<String>,
) -> Result<ApprovedTransfer, CoreError> {
    if !identity.is_manager() {
        return Err(CoreError::Forbidden {
            action: "approve release",
            requirement: "manager role",
        });
    }

    request.status.validate_transition(ReleaseStatus::Approved)?;

    let Some(new_owner_id) = request.claimer_id else {
        return Err(CoreError::MissingClaimer {
            request_id: request.id.unwrap_or(-1),
        });
    };

    let mut updated = request.clone();
    updated.status = ReleaseStatus::Approved;
    if manager_note.is_some() {
        updated.manager_note = manager_note;
    }

    Ok(ApprovedTransfer {
        request: updated,
        new_owner_id,
    })
}

/// Rejects a release. The original owner keeps the shift, whether or
/// not the request had been claimed.
///
/// # Errors
///
/// - `CoreError::Forbidden` if `identity` is not a manager.
/// - `CoreError::DomainViolation` if the request is already terminal.
pub fn reject(
    identity: &Identity,
    request: &ReleaseRequest,
    manager_note: Option<String>,
) -> Result<ReleaseRequest, CoreError> {
    if !identity.is_manager() {
        return Err(CoreError::Forbidden {
            action: "reject release",
            requirement: "manager role",
        });
    }

    request.status.validate_transition(ReleaseStatus::Rejected)?;

    let mut updated = request.clone();
    updated.status = ReleaseStatus::Rejected;
    if manager_note.is_some() {
        updated.manager_note = manager_note;
    }
    Ok(updated)
}

/// Cancels a release. Permitted for a manager or for the requester
/// themselves. The original owner keeps the shift.
///
/// # Errors
///
/// - `CoreError::Forbidden` if `identity` is neither a manager nor
///   acting for the requester.
/// - `CoreError::DomainViolation` if the request is already terminal.
pub fn cancel(identity: &Identity, request: &ReleaseRequest) -> Result<ReleaseRequest, CoreError> {
    if !identity.acts_for(request.requester_id) {
        return Err(CoreError::Forbidden {
            action: "cancel release",
            requirement: "manager role or being the requester",
        });
    }

    request.status.validate_transition(ReleaseStatus::Cancelled)?;

    let mut updated = request.clone();
    updated.status = ReleaseStatus::Cancelled;
    Ok(updated)
}
