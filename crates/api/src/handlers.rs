// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transport-agnostic API operations.
//!
//! Every mutation runs inside one immediate transaction: the loads,
//! the core decision functions, and the writes all see the same
//! serialized view of the store, so two racing check-then-act
//! sequences cannot both pass their guards.

use rusqlite::Connection;
use tracing::{info, warn};

use rota::{
    ApprovedTransfer, CoreError, EmployeePatch, Identity, ShiftPatch, approve as workflow_approve,
    cancel as workflow_cancel, check_schedule, claim as workflow_claim, reject as workflow_reject,
    release as workflow_release,
};
use rota_domain::{
    Employee, ReleaseRequest, ReleaseStatus, Shift, ShiftStatus, TimeOffRequest, TimeOffStatus,
    TimeOffType, validate_date_range, validate_employee_name, validate_max_weekly_hours,
};
use rota_persistence::{Persistence, mutations, queries};
use time::Date;

use crate::auth::{AuthenticatedUser, AuthenticationService, AuthorizationService};
use crate::error::ApiError;
use crate::request_response::{
    AssignReleaseRequest, AssignShiftRequest, ClaimReleaseRequest, ClaimReleaseResponse,
    CreateEmployeeRequest, CreateShiftRequest, CreateTimeOffRequest, DecisionRequest,
    EmployeeResponse, LoginRequest, LoginResponse, ReleaseResponse, ReleaseShiftRequest,
    ShiftFilter, ShiftResponse, ShopResponse, TemplateRequest, TemplateResponse, TimeOffResponse,
    UpdateEmployeeRequest, UpdateShiftRequest, WhoAmIResponse, parse_date_field, parse_time_field,
};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Authenticates a user and opens a session.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the credentials do not
/// match.
pub fn login(persistence: &Persistence, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    let (session_token, expires_at, user) =
        AuthenticationService::login(persistence, &request.username, &request.password)?;

    Ok(LoginResponse {
        session_token,
        username: user.username,
        role: user.role.as_str().to_string(),
        employee_id: user.employee_id,
        expires_at,
    })
}

/// Deletes the session for `token`. Idempotent.
///
/// # Errors
///
/// Returns an error if the session delete fails.
pub fn logout(persistence: &Persistence, token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, token)?;
    Ok(())
}

/// Echoes the authenticated user back to the caller.
#[must_use]
pub fn whoami(user: &AuthenticatedUser) -> WhoAmIResponse {
    WhoAmIResponse {
        username: user.username.clone(),
        role: user.role.as_str().to_string(),
        employee_id: user.employee_id,
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Resolves which employee the caller is acting for: the explicit one
/// (allowed for managers, or staff naming themselves) or the caller's
/// own linked employee record.
fn resolve_acting_employee(
    user: &AuthenticatedUser,
    requested: Option<i64>,
    action: &str,
) -> Result<i64, ApiError> {
    match requested {
        Some(employee_id) => {
            AuthorizationService::require_self_or_manager(user, employee_id, action)?;
            Ok(employee_id)
        }
        None => user.employee_id.ok_or_else(|| ApiError::InvalidState {
            message: String::from("This account has no linked employee record"),
        }),
    }
}

/// Looks up an approved time-off block, treating lookup failure as
/// advisory: the failure is logged and scheduling proceeds without
/// the block.
fn advisory_blocking_time_off(
    conn: &Connection,
    employee_id: i64,
    date: Date,
) -> Option<TimeOffRequest> {
    match queries::find_blocking_time_off(conn, employee_id, date) {
        Ok(blocking) => blocking,
        Err(e) => {
            warn!(
                employee_id,
                error = %e,
                "Time-off lookup failed; proceeding without the block"
            );
            None
        }
    }
}

/// Renders a schedule-overlap conflict with the clashing shift's shop
/// name and time range.
fn schedule_conflict_error(conn: &Connection, conflicting: &Shift) -> ApiError {
    let shop_name: String = queries::get_shop(conn, conflicting.shop_id)
        .map_or_else(|_| format!("shop {}", conflicting.shop_id), |s| s.name);
    ApiError::ScheduleConflict {
        message: format!(
            "Overlaps an existing shift at {shop_name} on {} ({} - {})",
            conflicting.date, conflicting.start, conflicting.end
        ),
    }
}

/// Runs the schedule gate and translates its conflicts, enriching the
/// overlap case with shop detail.
fn run_schedule_gate(
    conn: &Connection,
    candidate: &Shift,
    exclude_shift_id: Option<i64>,
    force: bool,
) -> Result<(), ApiError> {
    let overlap: Option<Shift> = match candidate.employee_id {
        Some(employee_id) => queries::find_overlapping_shift(
            conn,
            employee_id,
            candidate.date,
            candidate.start,
            candidate.end,
            exclude_shift_id,
        )?,
        None => None,
    };

    let blocking: Option<TimeOffRequest> = candidate
        .employee_id
        .and_then(|employee_id| advisory_blocking_time_off(conn, employee_id, candidate.date));

    check_schedule(
        candidate.start,
        candidate.end,
        overlap.as_ref(),
        blocking.as_ref(),
        force,
    )
    .map_err(|err| match err {
        CoreError::ScheduleConflict { conflicting } => schedule_conflict_error(conn, &conflicting),
        other => other.into(),
    })
}

// ---------------------------------------------------------------------------
// Shifts
// ---------------------------------------------------------------------------

/// Creates a shift (owned or open). Manager only.
///
/// # Errors
///
/// Returns a conflict error if the interval overlaps an existing
/// shift or an approved time-off range (the latter overridable with
/// `force`).
pub fn create_shift(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &CreateShiftRequest,
) -> Result<ShiftResponse, ApiError> {
    AuthorizationService::require_manager(user, "create_shift")?;

    let date: Date = parse_date_field(&request.date, "date")?;
    let start = parse_time_field(&request.start, "start")?;
    let end = parse_time_field(&request.end, "end")?;
    let notes: String = request.notes.clone().unwrap_or_default();

    let mut shift: Shift = match request.employee_id {
        Some(employee_id) => Shift::new(Some(employee_id), request.shop_id, date, start, end, notes),
        None => Shift::new_open(request.shop_id, date, start, end, notes),
    };

    let tx = persistence.begin_immediate()?;
    // Reject unknown shops and employees up front with a 404.
    queries::get_shop(&tx, request.shop_id)?;
    if let Some(employee_id) = request.employee_id {
        queries::get_employee(&tx, employee_id)?;
    }
    run_schedule_gate(&tx, &shift, None, request.force)?;
    let shift_id: i64 = mutations::insert_shift(&tx, &shift)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(shift_id, force = request.force, "Created shift");
    shift.id = Some(shift_id);
    Ok(shift.into())
}

/// Applies a partial update to a shift. Manager only.
///
/// # Errors
///
/// Returns a conflict error if the merged result overlaps an existing
/// shift or an approved time-off range.
pub fn update_shift(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    shift_id: i64,
    request: &UpdateShiftRequest,
) -> Result<ShiftResponse, ApiError> {
    AuthorizationService::require_manager(user, "update_shift")?;

    let mut patch = ShiftPatch {
        shop_id: request.shop_id,
        notes: request.notes.clone(),
        ..ShiftPatch::default()
    };
    if request.clear_employee {
        patch.employee_id = Some(None);
    } else if let Some(employee_id) = request.employee_id {
        patch.employee_id = Some(Some(employee_id));
    }
    if let Some(date) = &request.date {
        patch.date = Some(parse_date_field(date, "date")?);
    }
    if let Some(start) = &request.start {
        patch.start = Some(parse_time_field(start, "start")?);
    }
    if let Some(end) = &request.end {
        patch.end = Some(parse_time_field(end, "end")?);
    }
    if let Some(status) = &request.status {
        patch.status = Some(status.parse::<ShiftStatus>()?);
    }

    let tx = persistence.begin_immediate()?;
    let current: Shift = queries::get_shift(&tx, shift_id)?;
    let candidate: Shift = patch.apply(&current);
    if let Some(shop_id) = request.shop_id {
        queries::get_shop(&tx, shop_id)?;
    }
    if let Some(employee_id) = request.employee_id {
        queries::get_employee(&tx, employee_id)?;
    }
    if candidate.status != ShiftStatus::Cancelled {
        run_schedule_gate(&tx, &candidate, Some(shift_id), request.force)?;
    }
    mutations::update_shift(&tx, shift_id, &candidate)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(shift_id, "Updated shift");
    Ok(candidate.into())
}

/// Cancels a shift. Manager only.
///
/// Cancellation also cancels any release request for the shift still
/// in an active status, so no request can later transfer a cancelled
/// shift.
///
/// # Errors
///
/// Returns `ApiError::InvalidState` if the shift is already
/// cancelled.
pub fn cancel_shift(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    shift_id: i64,
) -> Result<ShiftResponse, ApiError> {
    AuthorizationService::require_manager(user, "cancel_shift")?;

    let tx = persistence.begin_immediate()?;
    let mut shift: Shift = queries::get_shift(&tx, shift_id)?;
    if shift.status == ShiftStatus::Cancelled {
        return Err(ApiError::InvalidState {
            message: format!("Shift {shift_id} is already cancelled"),
        });
    }

    mutations::set_shift_status(&tx, shift_id, ShiftStatus::Cancelled)?;

    if let Some(active) = queries::find_active_release_for_shift(&tx, shift_id)? {
        if let Some(request_id) = active.id {
            let mut cancelled: ReleaseRequest = active;
            cancelled.status = ReleaseStatus::Cancelled;
            mutations::update_release(&tx, request_id, &cancelled)?;
            info!(
                shift_id,
                request_id, "Cancelled active release along with its shift"
            );
        }
    }

    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(shift_id, "Cancelled shift");
    shift.status = ShiftStatus::Cancelled;
    Ok(shift.into())
}

/// Assigns an employee to a shift (typically an open one). Manager
/// only.
///
/// # Errors
///
/// Returns a conflict error if the assignment overlaps the employee's
/// schedule or an approved time-off range.
pub fn assign_shift(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    shift_id: i64,
    request: &AssignShiftRequest,
) -> Result<ShiftResponse, ApiError> {
    AuthorizationService::require_manager(user, "assign_shift")?;

    let tx = persistence.begin_immediate()?;
    let current: Shift = queries::get_shift(&tx, shift_id)?;
    if current.status != ShiftStatus::Scheduled {
        return Err(ApiError::InvalidState {
            message: format!(
                "Shift {shift_id} cannot be assigned from status '{}'",
                current.status
            ),
        });
    }
    queries::get_employee(&tx, request.employee_id)?;

    let mut candidate: Shift = current;
    candidate.employee_id = Some(request.employee_id);
    candidate.unassigned = false;

    run_schedule_gate(&tx, &candidate, Some(shift_id), request.force)?;
    mutations::update_shift(&tx, shift_id, &candidate)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(shift_id, employee_id = request.employee_id, "Assigned shift");
    Ok(candidate.into())
}

/// Bulk-generates open shifts from a weekly pattern, all or nothing.
/// Manager only.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a backwards date range or an
/// inverted slot time range.
pub fn generate_template_shifts(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &TemplateRequest,
) -> Result<TemplateResponse, ApiError> {
    AuthorizationService::require_manager(user, "generate_template_shifts")?;

    let date_from: Date = parse_date_field(&request.date_from, "date_from")?;
    let date_to: Date = parse_date_field(&request.date_to, "date_to")?;
    validate_date_range(date_from, date_to)?;

    let mut slots = Vec::with_capacity(request.slots.len());
    for slot in &request.slots {
        let start = parse_time_field(&slot.start, "start")?;
        let end = parse_time_field(&slot.end, "end")?;
        if start >= end {
            return Err(ApiError::InvalidInput {
                field: String::from("slots"),
                message: format!("slot {} - {} does not run forward", slot.start, slot.end),
            });
        }
        slots.push((slot.weekday, start, end, slot.count));
    }

    let tx = persistence.begin_immediate()?;
    queries::get_shop(&tx, request.shop_id)?;

    let mut created: u32 = 0;
    let mut day: Date = date_from;
    loop {
        let weekday: u8 = day.weekday().number_from_monday();
        for (slot_weekday, start, end, count) in &slots {
            if weekday != *slot_weekday {
                continue;
            }
            for _ in 0..*count {
                let shift = Shift::new_open(
                    request.shop_id,
                    day,
                    *start,
                    *end,
                    String::from("Open shift"),
                );
                mutations::insert_shift(&tx, &shift)?;
                created += 1;
            }
        }
        if day >= date_to {
            break;
        }
        let Some(next) = day.next_day() else { break };
        day = next;
    }

    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(shop_id = request.shop_id, created, "Generated open shifts from template");
    Ok(TemplateResponse { created })
}

/// Lists shifts in a date range with optional shop/employee filters.
/// Cancelled shifts are excluded unless requested.
///
/// # Errors
///
/// Returns an error if the range does not parse or the query fails.
pub fn list_shifts(
    persistence: &Persistence,
    filter: &ShiftFilter,
) -> Result<Vec<ShiftResponse>, ApiError> {
    let date_from: Date = parse_date_field(&filter.date_from, "date_from")?;
    let date_to: Date = parse_date_field(&filter.date_to, "date_to")?;
    validate_date_range(date_from, date_to)?;

    let shifts = queries::list_shifts_in_range(persistence.connection(), date_from, date_to)?;

    Ok(shifts
        .into_iter()
        .filter(|shift| filter.include_cancelled || shift.status != ShiftStatus::Cancelled)
        .filter(|shift| filter.shop_id.is_none_or(|shop_id| shift.shop_id == shop_id))
        .filter(|shift| {
            filter
                .employee_id
                .is_none_or(|employee_id| shift.employee_id == Some(employee_id))
        })
        .map(ShiftResponse::from)
        .collect())
}

// ---------------------------------------------------------------------------
// Release workflow
// ---------------------------------------------------------------------------

/// Releases a shift back to the pool, creating a pending request.
///
/// # Errors
///
/// Returns `ApiError::DuplicateRelease` if the shift already has an
/// active request, and state errors per the workflow guards.
pub fn release_shift(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &ReleaseShiftRequest,
) -> Result<ReleaseResponse, ApiError> {
    let requester_id: i64 =
        resolve_acting_employee(user, request.employee_id, "release_shift")?;
    let identity: Identity = user.to_identity();
    let message: String = request.message.clone().unwrap_or_default();

    let tx = persistence.begin_immediate()?;
    let shift: Shift = queries::get_shift(&tx, request.shift_id)?;
    let active = queries::find_active_release_for_shift(&tx, request.shift_id)?;

    let mut new_request: ReleaseRequest =
        workflow_release(&identity, &shift, requester_id, active.as_ref(), message)?;
    let request_id: i64 = mutations::insert_release(&tx, &new_request)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(shift_id = request.shift_id, request_id, "Released shift");
    new_request.id = Some(request_id);
    Ok(new_request.into())
}

/// Claims a pending release for an employee.
///
/// The response carries a non-blocking advisory if the claimer
/// already works an overlapping shift that day; the manager sees it
/// before deciding.
///
/// # Errors
///
/// Returns state errors per the workflow guards (self-claim, already
/// claimed, terminal request).
pub fn claim_release(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request_id: i64,
    request: &ClaimReleaseRequest,
) -> Result<ClaimReleaseResponse, ApiError> {
    let claimer_id: i64 = resolve_acting_employee(user, request.employee_id, "claim_release")?;
    let identity: Identity = user.to_identity();

    let tx = persistence.begin_immediate()?;
    let stored: ReleaseRequest = queries::get_release(&tx, request_id)?;
    let updated: ReleaseRequest = workflow_claim(&identity, &stored, claimer_id)?;

    let shift: Shift = queries::get_shift(&tx, updated.shift_id)?;
    let overlap_warning: Option<String> = queries::find_overlapping_shift(
        &tx,
        claimer_id,
        shift.date,
        shift.start,
        shift.end,
        None,
    )?
    .map(|existing| {
        format!(
            "Claimer already works {} - {} on {}",
            existing.start, existing.end, existing.date
        )
    });

    mutations::update_release(&tx, request_id, &updated)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    if let Some(warning) = &overlap_warning {
        warn!(request_id, claimer_id, %warning, "Claim carries an overlap advisory");
    }
    info!(request_id, claimer_id, "Claimed release");

    Ok(ClaimReleaseResponse {
        request: updated.into(),
        overlap_warning,
    })
}

/// Approves a claimed release, transferring the shift to the claimer.
/// Manager only. The request update and the ownership transfer commit
/// together.
///
/// # Errors
///
/// Returns state errors per the workflow guards; a second approval of
/// the same request fails and transfers nothing.
pub fn approve_release(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request_id: i64,
    request: &DecisionRequest,
) -> Result<ReleaseResponse, ApiError> {
    let identity: Identity = user.to_identity();

    let tx = persistence.begin_immediate()?;
    let stored: ReleaseRequest = queries::get_release(&tx, request_id)?;
    let transfer: ApprovedTransfer =
        workflow_approve(&identity, &stored, request.manager_note.clone())?;

    mutations::update_release(&tx, request_id, &transfer.request)?;
    mutations::set_shift_owner(&tx, transfer.request.shift_id, transfer.new_owner_id)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(
        request_id,
        shift_id = transfer.request.shift_id,
        new_owner_id = transfer.new_owner_id,
        "Approved release; shift transferred"
    );
    Ok(transfer.request.into())
}

/// Rejects a release. Manager only. The original owner keeps the
/// shift.
///
/// # Errors
///
/// Returns state errors per the workflow guards.
pub fn reject_release(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request_id: i64,
    request: &DecisionRequest,
) -> Result<ReleaseResponse, ApiError> {
    let identity: Identity = user.to_identity();

    let tx = persistence.begin_immediate()?;
    let stored: ReleaseRequest = queries::get_release(&tx, request_id)?;
    let updated: ReleaseRequest =
        workflow_reject(&identity, &stored, request.manager_note.clone())?;
    mutations::update_release(&tx, request_id, &updated)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(request_id, "Rejected release");
    Ok(updated.into())
}

/// Cancels a release. Permitted for the requester or a manager. The
/// original owner keeps the shift.
///
/// # Errors
///
/// Returns state errors per the workflow guards.
pub fn cancel_release(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request_id: i64,
) -> Result<ReleaseResponse, ApiError> {
    let identity: Identity = user.to_identity();

    let tx = persistence.begin_immediate()?;
    let stored: ReleaseRequest = queries::get_release(&tx, request_id)?;
    let updated: ReleaseRequest = workflow_cancel(&identity, &stored)?;
    mutations::update_release(&tx, request_id, &updated)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(request_id, "Cancelled release");
    Ok(updated.into())
}

/// Manager shortcut: claim and approve a pending release for a named
/// employee in one transaction.
///
/// # Errors
///
/// Returns state errors per the workflow guards (including
/// self-claim when the named employee is the requester).
pub fn assign_release(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request_id: i64,
    request: &AssignReleaseRequest,
) -> Result<ReleaseResponse, ApiError> {
    AuthorizationService::require_manager(user, "assign_release")?;
    let identity: Identity = user.to_identity();

    let tx = persistence.begin_immediate()?;
    let stored: ReleaseRequest = queries::get_release(&tx, request_id)?;
    queries::get_employee(&tx, request.employee_id)?;

    let claimed: ReleaseRequest = workflow_claim(&identity, &stored, request.employee_id)?;
    let transfer: ApprovedTransfer =
        workflow_approve(&identity, &claimed, request.manager_note.clone())?;

    mutations::update_release(&tx, request_id, &transfer.request)?;
    mutations::set_shift_owner(&tx, transfer.request.shift_id, transfer.new_owner_id)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(
        request_id,
        employee_id = request.employee_id,
        "Assigned release directly"
    );
    Ok(transfer.request.into())
}

/// Lists release requests, optionally filtered by status string.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown status string.
pub fn list_releases(
    persistence: &Persistence,
    status: Option<&str>,
) -> Result<Vec<ReleaseResponse>, ApiError> {
    let status: Option<ReleaseStatus> = match status {
        Some(s) => Some(s.parse::<ReleaseStatus>()?),
        None => None,
    };

    let requests = queries::list_releases(persistence.connection(), status)?;
    Ok(requests.into_iter().map(ReleaseResponse::from).collect())
}

// ---------------------------------------------------------------------------
// Time off
// ---------------------------------------------------------------------------

/// Creates a pending time-off request.
///
/// # Errors
///
/// Returns `ApiError::DuplicateTimeOff` if the employee already has a
/// non-rejected request overlapping the range.
pub fn create_time_off(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &CreateTimeOffRequest,
) -> Result<TimeOffResponse, ApiError> {
    let employee_id: i64 =
        resolve_acting_employee(user, request.employee_id, "create_time_off")?;

    let date_from: Date = parse_date_field(&request.date_from, "date_from")?;
    let date_to: Date = parse_date_field(&request.date_to, "date_to")?;
    validate_date_range(date_from, date_to)?;
    let kind: TimeOffType = request.kind.parse::<TimeOffType>()?;
    let reason: String = request.reason.clone().unwrap_or_default();

    let tx = persistence.begin_immediate()?;
    queries::get_employee(&tx, employee_id)?;
    if let Some(existing) =
        queries::find_overlapping_time_off(&tx, employee_id, date_from, date_to, None)?
    {
        return Err(ApiError::DuplicateTimeOff {
            message: format!(
                "An existing {} request already covers {} to {}",
                existing.status.as_str(),
                existing.date_from,
                existing.date_to
            ),
        });
    }

    let mut new_request = TimeOffRequest::new(employee_id, date_from, date_to, kind, reason);
    let time_off_id: i64 = mutations::insert_time_off(&tx, &new_request)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(time_off_id, employee_id, "Created time-off request");
    new_request.id = Some(time_off_id);
    Ok(new_request.into())
}

fn decide_time_off(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    time_off_id: i64,
    decision: TimeOffStatus,
    action: &str,
) -> Result<TimeOffResponse, ApiError> {
    AuthorizationService::require_manager(user, action)?;

    let tx = persistence.begin_immediate()?;
    let mut stored: TimeOffRequest = queries::get_time_off(&tx, time_off_id)?;
    if stored.status != TimeOffStatus::Pending {
        return Err(ApiError::InvalidState {
            message: format!(
                "Time-off request {time_off_id} has already been decided ('{}')",
                stored.status.as_str()
            ),
        });
    }

    mutations::set_time_off_status(&tx, time_off_id, decision)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(time_off_id, decision = decision.as_str(), "Decided time-off request");
    stored.status = decision;
    Ok(stored.into())
}

/// Approves a pending time-off request. Manager only. From this point
/// the range blocks scheduling.
///
/// # Errors
///
/// Returns `ApiError::InvalidState` if the request was already
/// decided.
pub fn approve_time_off(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    time_off_id: i64,
) -> Result<TimeOffResponse, ApiError> {
    decide_time_off(
        persistence,
        user,
        time_off_id,
        TimeOffStatus::Approved,
        "approve_time_off",
    )
}

/// Rejects a pending time-off request. Manager only.
///
/// # Errors
///
/// Returns `ApiError::InvalidState` if the request was already
/// decided.
pub fn reject_time_off(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    time_off_id: i64,
) -> Result<TimeOffResponse, ApiError> {
    decide_time_off(
        persistence,
        user,
        time_off_id,
        TimeOffStatus::Rejected,
        "reject_time_off",
    )
}

/// Withdraws a pending time-off request, deleting it. Permitted for
/// the requesting employee or a manager.
///
/// # Errors
///
/// Returns `ApiError::InvalidState` if the request was already
/// decided.
pub fn cancel_time_off(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    time_off_id: i64,
) -> Result<(), ApiError> {
    let tx = persistence.begin_immediate()?;
    let stored: TimeOffRequest = queries::get_time_off(&tx, time_off_id)?;
    AuthorizationService::require_self_or_manager(user, stored.employee_id, "cancel_time_off")?;
    if stored.status != TimeOffStatus::Pending {
        return Err(ApiError::InvalidState {
            message: format!(
                "Time-off request {time_off_id} has already been decided ('{}')",
                stored.status.as_str()
            ),
        });
    }

    mutations::delete_time_off(&tx, time_off_id)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(time_off_id, "Withdrew time-off request");
    Ok(())
}

/// Lists time-off requests, optionally restricted to one employee or
/// one status.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown status string.
pub fn list_time_off(
    persistence: &Persistence,
    employee_id: Option<i64>,
    status: Option<&str>,
) -> Result<Vec<TimeOffResponse>, ApiError> {
    let status: Option<TimeOffStatus> = match status {
        Some(s) => Some(s.parse::<TimeOffStatus>()?),
        None => None,
    };

    let requests = match employee_id {
        Some(employee_id) => {
            let all = queries::list_time_off_for_employee(persistence.connection(), employee_id)?;
            all.into_iter()
                .filter(|r| status.is_none_or(|s| r.status == s))
                .collect()
        }
        None => queries::list_time_off(persistence.connection(), status)?,
    };

    Ok(requests.into_iter().map(TimeOffResponse::from).collect())
}

// ---------------------------------------------------------------------------
// Employees and shops
// ---------------------------------------------------------------------------

/// Creates an employee, optionally with a linked staff login
/// account. Manager only.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a blank name, a bad weekly
/// cap, or a username without a password.
pub fn create_employee(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &CreateEmployeeRequest,
) -> Result<EmployeeResponse, ApiError> {
    AuthorizationService::require_manager(user, "create_employee")?;

    validate_employee_name(&request.name)?;
    let max_weekly_hours: f64 = request.max_weekly_hours.unwrap_or(40.0);
    validate_max_weekly_hours(max_weekly_hours)?;

    let account: Option<(String, String)> = match (&request.username, &request.password) {
        (Some(username), Some(password)) => {
            let hash: String = AuthenticationService::hash_password(password)?;
            Some((username.clone(), hash))
        }
        (Some(_), None) => {
            return Err(ApiError::InvalidInput {
                field: String::from("password"),
                message: String::from("a password is required when creating a login account"),
            });
        }
        _ => None,
    };

    let mut employee = Employee::new(
        request.name.clone(),
        request.phone.clone(),
        request.role_label.clone(),
        max_weekly_hours,
    );

    let tx = persistence.begin_immediate()?;
    if let Some((username, password_hash)) = account {
        let user_id: i64 = mutations::insert_user(&tx, &username, &password_hash, "staff", None)?;
        employee.user_id = Some(user_id);
        let employee_id: i64 = mutations::insert_employee(&tx, &employee)?;
        mutations::link_user_to_employee(&tx, user_id, employee_id)?;
        employee.id = Some(employee_id);
    } else {
        let employee_id: i64 = mutations::insert_employee(&tx, &employee)?;
        employee.id = Some(employee_id);
    }
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(employee_id = employee.id, "Created employee");
    Ok(employee.into())
}

/// Applies a partial update to an employee. Manager only.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a blank name or a bad weekly
/// cap.
pub fn update_employee(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    employee_id: i64,
    request: &UpdateEmployeeRequest,
) -> Result<EmployeeResponse, ApiError> {
    AuthorizationService::require_manager(user, "update_employee")?;

    if let Some(name) = &request.name {
        validate_employee_name(name)?;
    }
    if let Some(hours) = request.max_weekly_hours {
        validate_max_weekly_hours(hours)?;
    }

    let mut patch = EmployeePatch {
        name: request.name.clone(),
        max_weekly_hours: request.max_weekly_hours,
        active: request.active,
        ..EmployeePatch::default()
    };
    if request.clear_phone {
        patch.phone = Some(None);
    } else if let Some(phone) = &request.phone {
        patch.phone = Some(Some(phone.clone()));
    }
    if request.clear_role_label {
        patch.role_label = Some(None);
    } else if let Some(role_label) = &request.role_label {
        patch.role_label = Some(Some(role_label.clone()));
    }

    let tx = persistence.begin_immediate()?;
    let current = queries::get_employee(&tx, employee_id)?;
    let updated = patch.apply(&current);
    mutations::update_employee(&tx, employee_id, &updated)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(employee_id, "Updated employee");
    Ok(updated.into())
}

/// Soft-deletes an employee by marking them inactive. Manager only.
/// History referencing the employee stays intact.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if the employee does not exist.
pub fn deactivate_employee(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    employee_id: i64,
) -> Result<EmployeeResponse, ApiError> {
    AuthorizationService::require_manager(user, "deactivate_employee")?;

    let tx = persistence.begin_immediate()?;
    let mut employee = queries::get_employee(&tx, employee_id)?;
    employee.active = false;
    mutations::update_employee(&tx, employee_id, &employee)?;
    tx.commit().map_err(rota_persistence::PersistenceError::from)?;

    info!(employee_id, "Deactivated employee");
    Ok(employee.into())
}

/// Lists employees (active only by default).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_employees(
    persistence: &Persistence,
    include_inactive: bool,
) -> Result<Vec<EmployeeResponse>, ApiError> {
    let employees = queries::list_employees(persistence.connection(), include_inactive)?;
    Ok(employees.into_iter().map(EmployeeResponse::from).collect())
}

/// Lists shops (active only by default).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_shops(
    persistence: &Persistence,
    include_inactive: bool,
) -> Result<Vec<ShopResponse>, ApiError> {
    let shops = queries::list_shops(persistence.connection(), include_inactive)?;
    Ok(shops.into_iter().map(ShopResponse::from).collect())
}
