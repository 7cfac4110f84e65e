// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduling and workflow decision logic for the Rota scheduling
//! system.
//!
//! Every function in this crate is a pure function of the operation,
//! the identity performing it, and already-loaded entity state. The
//! caller (the API layer) is responsible for loading that state and
//! for persisting the returned results inside a single store
//! transaction, so that check-then-act sequences are serialized.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod alerts;
mod error;
mod identity;
mod patch;
mod schedule;
mod workflow;

#[cfg(test)]
mod tests;

pub use alerts::{
    Alert, AlertKind, AlertSeverity, double_booking_alerts, over_hours_alerts,
    pending_workflow_alerts, uncovered_shop_alerts, week_containing,
};
pub use error::CoreError;
pub use identity::{Identity, Role};
pub use patch::{EmployeePatch, ShiftPatch};
pub use schedule::check_schedule;
pub use workflow::{approve, cancel, claim, reject, release, ApprovedTransfer};
