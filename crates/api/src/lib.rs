// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Boundary layer for the Rota scheduling system.
//!
//! Handlers here are transport-agnostic functions: they take the
//! persistence handle, the authenticated user, and a request DTO,
//! open one immediate transaction per mutation, run the decision
//! logic from the core crate inside it, and commit. The HTTP server
//! crate is a thin adapter over these functions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod conflicts;
mod error;
mod export;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService, AuthorizationService};
pub use conflicts::list_conflicts;
pub use error::{ApiError, AuthError};
pub use export::{export_hours, hours_report_to_csv};
pub use handlers::{
    approve_release, approve_time_off, assign_release, assign_shift, cancel_release, cancel_shift,
    cancel_time_off, claim_release, create_employee, create_shift, create_time_off,
    deactivate_employee, generate_template_shifts, list_employees, list_releases, list_shifts,
    list_shops, list_time_off, login, logout, reject_release, reject_time_off, release_shift,
    update_employee, update_shift, whoami,
};
pub use request_response::{
    AssignReleaseRequest, AssignShiftRequest, ClaimReleaseRequest, ClaimReleaseResponse,
    ConflictReport, CreateEmployeeRequest, CreateShiftRequest, CreateTimeOffRequest,
    DecisionRequest, EmployeeResponse, HoursExportRequest, HoursReport, HoursRow, LoginRequest,
    LoginResponse, ReleaseResponse, ReleaseShiftRequest, ShiftFilter, ShiftResponse, ShopResponse,
    TemplateRequest, TemplateResponse, TemplateSlot, TimeOffResponse, UpdateEmployeeRequest,
    UpdateShiftRequest, WhoAmIResponse,
};
