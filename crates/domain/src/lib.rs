// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rule validation for the Rota scheduling system.
//!
//! This crate holds the pure vocabulary of the scheduler: employees,
//! shops, shifts, time-off requests, and release requests, together
//! with the closed status enumerations and their transition rules.
//! Nothing in this crate performs I/O or touches persistence.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod overlap;
mod release;
mod types;
mod validation;

pub use error::DomainError;
pub use overlap::{find_overlap, intervals_overlap, minutes_between};
pub use release::{ReleaseRequest, ReleaseStatus};
pub use types::{Employee, Shift, ShiftStatus, Shop, TimeOffRequest, TimeOffStatus, TimeOffType};
pub use validation::{
    validate_date_range, validate_employee_name, validate_max_weekly_hours, validate_time_range,
};
