// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API layer.
//!
//! Dates ride the wire as `YYYY-MM-DD` and times as `HH:MM` (seconds
//! accepted on input); parsing into `time` types happens here so the
//! handlers only see validated values.

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Time};

use rota::Alert;
use rota_domain::{Employee, ReleaseRequest, Shift, Shop, TimeOffRequest};

use crate::error::ApiError;

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
const TIME_FORMAT_MINUTES: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]");
const TIME_FORMAT_SECONDS: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Parses a `YYYY-MM-DD` request field.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming `field` if the value does
/// not parse.
pub(crate) fn parse_date_field(value: &str, field: &str) -> Result<Date, ApiError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: String::from(field),
        message: format!("'{value}' is not a valid date: {e}"),
    })
}

/// Parses an `HH:MM` (or `HH:MM:SS`) request field.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming `field` if the value does
/// not parse.
pub(crate) fn parse_time_field(value: &str, field: &str) -> Result<Time, ApiError> {
    Time::parse(value, TIME_FORMAT_MINUTES)
        .or_else(|_| Time::parse(value, TIME_FORMAT_SECONDS))
        .map_err(|e| ApiError::InvalidInput {
            field: String::from(field),
            message: format!("'{value}' is not a valid time: {e}"),
        })
}

fn render_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

fn render_time(t: Time) -> String {
    t.format(TIME_FORMAT_MINUTES)
        .unwrap_or_else(|_| t.to_string())
}

/// Login request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password, verified against the stored bcrypt hash.
    pub password: String,
}

/// Login response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// The opaque session token for `Authorization: Bearer`.
    pub session_token: String,
    /// Login name.
    pub username: String,
    /// Role string (`manager` or `staff`).
    pub role: String,
    /// The linked employee record, if any.
    pub employee_id: Option<i64>,
    /// Session expiry as unix epoch seconds.
    pub expires_at: i64,
}

/// Session echo response.
#[derive(Debug, Clone, Serialize)]
pub struct WhoAmIResponse {
    /// Login name.
    pub username: String,
    /// Role string (`manager` or `staff`).
    pub role: String,
    /// The linked employee record, if any.
    pub employee_id: Option<i64>,
}

/// Request to create a shift.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShiftRequest {
    /// The owning employee, or `None` for an open shift.
    pub employee_id: Option<i64>,
    /// The shop the shift is worked at.
    pub shop_id: i64,
    /// Date as `YYYY-MM-DD`.
    pub date: String,
    /// Start time as `HH:MM`.
    pub start: String,
    /// End time as `HH:MM`.
    pub end: String,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Override the approved-time-off block. Never overrides a
    /// schedule overlap.
    #[serde(default)]
    pub force: bool,
}

/// Request to update a shift. Absent fields keep their current
/// values; `clear_employee` turns the shift into an open one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateShiftRequest {
    /// New owner.
    #[serde(default)]
    pub employee_id: Option<i64>,
    /// Remove the owner, making the shift open. Wins over
    /// `employee_id`.
    #[serde(default)]
    pub clear_employee: bool,
    /// New shop.
    #[serde(default)]
    pub shop_id: Option<i64>,
    /// New date as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// New start time as `HH:MM`.
    #[serde(default)]
    pub start: Option<String>,
    /// New end time as `HH:MM`.
    #[serde(default)]
    pub end: Option<String>,
    /// New lifecycle status string.
    #[serde(default)]
    pub status: Option<String>,
    /// New notes text.
    #[serde(default)]
    pub notes: Option<String>,
    /// Override the approved-time-off block.
    #[serde(default)]
    pub force: bool,
}

/// Request to assign an employee to a shift.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignShiftRequest {
    /// The employee to assign.
    pub employee_id: i64,
    /// Override the approved-time-off block.
    #[serde(default)]
    pub force: bool,
}

/// One weekday slot in a bulk-generation pattern.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSlot {
    /// ISO weekday number, 1 = Monday through 7 = Sunday.
    pub weekday: u8,
    /// Start time as `HH:MM`.
    pub start: String,
    /// End time as `HH:MM`.
    pub end: String,
    /// How many identical open shifts to create per matching day.
    pub count: u32,
}

/// Request to bulk-generate open shifts from a weekly pattern.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateRequest {
    /// The shop to generate for.
    pub shop_id: i64,
    /// First date of the range (inclusive), `YYYY-MM-DD`.
    pub date_from: String,
    /// Last date of the range (inclusive), `YYYY-MM-DD`.
    pub date_to: String,
    /// The weekday pattern.
    pub slots: Vec<TemplateSlot>,
}

/// Filters for the shift listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftFilter {
    /// First date of the range (inclusive), `YYYY-MM-DD`.
    pub date_from: String,
    /// Last date of the range (inclusive), `YYYY-MM-DD`.
    pub date_to: String,
    /// Restrict to one shop.
    #[serde(default)]
    pub shop_id: Option<i64>,
    /// Restrict to one employee.
    #[serde(default)]
    pub employee_id: Option<i64>,
    /// Include cancelled shifts (excluded by default).
    #[serde(default)]
    pub include_cancelled: bool,
}

/// A shift as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftResponse {
    /// The shift ID.
    pub id: i64,
    /// The owning employee, if any.
    pub employee_id: Option<i64>,
    /// The shop.
    pub shop_id: i64,
    /// Date as `YYYY-MM-DD`.
    pub date: String,
    /// Start time as `HH:MM`.
    pub start: String,
    /// End time as `HH:MM`.
    pub end: String,
    /// Lifecycle status string.
    pub status: String,
    /// Free-text notes.
    pub notes: String,
    /// Whether this is an open shift.
    pub unassigned: bool,
}

impl From<Shift> for ShiftResponse {
    fn from(shift: Shift) -> Self {
        Self {
            id: shift.id.unwrap_or(-1),
            employee_id: shift.employee_id,
            shop_id: shift.shop_id,
            date: render_date(shift.date),
            start: render_time(shift.start),
            end: render_time(shift.end),
            status: shift.status.as_str().to_string(),
            notes: shift.notes,
            unassigned: shift.unassigned,
        }
    }
}

/// Request to release a shift back to the pool.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseShiftRequest {
    /// The shift to release.
    pub shift_id: i64,
    /// The releasing employee. Defaults to the caller's own linked
    /// employee; managers may release on anyone's behalf.
    #[serde(default)]
    pub employee_id: Option<i64>,
    /// Free-text message shown to potential claimers.
    #[serde(default)]
    pub message: Option<String>,
}

/// Request to claim a released shift.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimReleaseRequest {
    /// The claiming employee. Defaults to the caller's own linked
    /// employee.
    #[serde(default)]
    pub employee_id: Option<i64>,
}

/// Manager decision payload for approve/reject.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecisionRequest {
    /// Optional note recorded with the decision.
    #[serde(default)]
    pub manager_note: Option<String>,
}

/// Manager shortcut: claim and approve a pending release for a named
/// employee in one step.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignReleaseRequest {
    /// The employee who takes the shift.
    pub employee_id: i64,
    /// Optional note recorded with the decision.
    #[serde(default)]
    pub manager_note: Option<String>,
}

/// A release request as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseResponse {
    /// The request ID.
    pub id: i64,
    /// The shift being released.
    pub shift_id: i64,
    /// The releasing employee.
    pub requester_id: i64,
    /// The claiming employee, if claimed.
    pub claimer_id: Option<i64>,
    /// Workflow status string.
    pub status: String,
    /// Free-text message from the requester.
    pub message: String,
    /// Manager's decision note, if any.
    pub manager_note: Option<String>,
}

impl From<ReleaseRequest> for ReleaseResponse {
    fn from(request: ReleaseRequest) -> Self {
        Self {
            id: request.id.unwrap_or(-1),
            shift_id: request.shift_id,
            requester_id: request.requester_id,
            claimer_id: request.claimer_id,
            status: request.status.as_str().to_string(),
            message: request.message,
            manager_note: request.manager_note,
        }
    }
}

/// Response to a claim, carrying the updated request plus an
/// advisory if the claimer already works an overlapping shift that
/// day. The advisory never blocks the claim; the manager sees it
/// before approving.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimReleaseResponse {
    /// The updated request.
    pub request: ReleaseResponse,
    /// Rendered overlap advisory, if any.
    pub overlap_warning: Option<String>,
}

/// Response to bulk template generation.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    /// How many open shifts were created.
    pub created: u32,
}

/// Request to create a time-off request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeOffRequest {
    /// The employee requesting time off. Defaults to the caller's
    /// own linked employee.
    #[serde(default)]
    pub employee_id: Option<i64>,
    /// First day (inclusive), `YYYY-MM-DD`.
    pub date_from: String,
    /// Last day (inclusive), `YYYY-MM-DD`.
    pub date_to: String,
    /// Category string (`vacation`, `unavailable`, `sick`,
    /// `personal`).
    pub kind: String,
    /// Free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
}

/// A time-off request as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct TimeOffResponse {
    /// The request ID.
    pub id: i64,
    /// The employee requesting time off.
    pub employee_id: i64,
    /// First day (inclusive), `YYYY-MM-DD`.
    pub date_from: String,
    /// Last day (inclusive), `YYYY-MM-DD`.
    pub date_to: String,
    /// Category string.
    pub kind: String,
    /// Free-text reason.
    pub reason: String,
    /// Approval status string.
    pub status: String,
}

impl From<TimeOffRequest> for TimeOffResponse {
    fn from(request: TimeOffRequest) -> Self {
        Self {
            id: request.id.unwrap_or(-1),
            employee_id: request.employee_id,
            date_from: render_date(request.date_from),
            date_to: render_date(request.date_to),
            kind: request.kind.as_str().to_string(),
            reason: request.reason,
            status: request.status.as_str().to_string(),
        }
    }
}

/// Request to create an employee, optionally with a login account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Display name.
    pub name: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-text role label.
    #[serde(default)]
    pub role_label: Option<String>,
    /// Weekly hours cap. Defaults to 40.
    #[serde(default)]
    pub max_weekly_hours: Option<f64>,
    /// Login name for a linked staff account, if one is wanted.
    #[serde(default)]
    pub username: Option<String>,
    /// Password for the linked account. Required when `username` is
    /// set.
    #[serde(default)]
    pub password: Option<String>,
}

/// Request to update an employee. Absent fields keep their current
/// values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Clear the phone number. Wins over `phone`.
    #[serde(default)]
    pub clear_phone: bool,
    /// New role label.
    #[serde(default)]
    pub role_label: Option<String>,
    /// Clear the role label. Wins over `role_label`.
    #[serde(default)]
    pub clear_role_label: bool,
    /// New weekly hours cap.
    #[serde(default)]
    pub max_weekly_hours: Option<f64>,
    /// Activate or deactivate.
    #[serde(default)]
    pub active: Option<bool>,
}

/// An employee as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    /// The employee ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Free-text role label.
    pub role_label: Option<String>,
    /// Weekly hours cap.
    pub max_weekly_hours: f64,
    /// Whether the employee is active.
    pub active: bool,
    /// Linked user account, if any.
    pub user_id: Option<i64>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.unwrap_or(-1),
            name: employee.name,
            phone: employee.phone,
            role_label: employee.role_label,
            max_weekly_hours: employee.max_weekly_hours,
            active: employee.active,
            user_id: employee.user_id,
        }
    }
}

/// A shop as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ShopResponse {
    /// The shop ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Display color as a hex string.
    pub color: String,
    /// Whether the shop is active.
    pub active: bool,
}

impl From<Shop> for ShopResponse {
    fn from(shop: Shop) -> Self {
        Self {
            id: shop.id.unwrap_or(-1),
            name: shop.name,
            color: shop.color,
            active: shop.active,
        }
    }
}

/// Parameters for the payroll hours export.
#[derive(Debug, Clone, Deserialize)]
pub struct HoursExportRequest {
    /// First date of the range (inclusive), `YYYY-MM-DD`.
    pub date_from: String,
    /// Last date of the range (inclusive), `YYYY-MM-DD`.
    pub date_to: String,
    /// Restrict to shifts at one shop. When set, employees with no
    /// matching shifts are omitted from the report.
    #[serde(default)]
    pub shop_id: Option<i64>,
}

/// One employee's totals in the hours report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursRow {
    /// The employee ID.
    pub employee_id: i64,
    /// The employee's display name.
    pub name: String,
    /// Number of non-cancelled shifts in the range.
    pub shift_count: u32,
    /// Total scheduled minutes.
    pub total_minutes: i64,
    /// Total scheduled hours, to two decimal places.
    pub total_hours: f64,
}

/// The payroll hours report.
#[derive(Debug, Clone, Serialize)]
pub struct HoursReport {
    /// First date of the range (inclusive), `YYYY-MM-DD`.
    pub date_from: String,
    /// Last date of the range (inclusive), `YYYY-MM-DD`.
    pub date_to: String,
    /// Per-employee totals, ordered by name.
    pub rows: Vec<HoursRow>,
}

/// The conflict scan response.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictReport {
    /// Every advisory finding, hard defects first.
    pub alerts: Vec<Alert>,
}
