// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Partial-update descriptions for editable entities.
//!
//! A patch carries only the fields the caller wants to change;
//! `apply` merges it over the current record to produce the candidate
//! the guards then validate.

use rota_domain::{Employee, Shift, ShiftStatus};
use time::{Date, Time};

/// A partial update to a shift.
///
/// `employee_id` is doubly optional: the outer `Option` distinguishes
/// "leave as is" from "change", and the inner one allows setting the
/// owner to nothing (turning the shift into an open one).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftPatch {
    /// New owner, or `Some(None)` to unassign.
    pub employee_id: Option<Option<i64>>,
    /// New shop.
    pub shop_id: Option<i64>,
    /// New date.
    pub date: Option<Date>,
    /// New start time.
    pub start: Option<Time>,
    /// New end time.
    pub end: Option<Time>,
    /// New status.
    pub status: Option<ShiftStatus>,
    /// New notes text.
    pub notes: Option<String>,
}

impl ShiftPatch {
    /// Merges this patch over `current`, returning the candidate
    /// shift. Does not validate; callers run the schedule checks on
    /// the result.
    #[must_use]
    pub fn apply(&self, current: &Shift) -> Shift {
        let employee_id = self.employee_id.unwrap_or(current.employee_id);
        Shift {
            id: current.id,
            employee_id,
            shop_id: self.shop_id.unwrap_or(current.shop_id),
            date: self.date.unwrap_or(current.date),
            start: self.start.unwrap_or(current.start),
            end: self.end.unwrap_or(current.end),
            status: self.status.unwrap_or(current.status),
            notes: self.notes.clone().unwrap_or_else(|| current.notes.clone()),
            unassigned: employee_id.is_none(),
        }
    }

    /// Returns whether the patch changes any scheduling field
    /// (owner, date, or times) that requires re-running conflict
    /// checks.
    #[must_use]
    pub const fn touches_schedule(&self) -> bool {
        self.employee_id.is_some()
            || self.date.is_some()
            || self.start.is_some()
            || self.end.is_some()
    }
}

/// A partial update to an employee record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    /// New display name.
    pub name: Option<String>,
    /// New phone number, or `Some(None)` to clear it.
    pub phone: Option<Option<String>>,
    /// New role label, or `Some(None)` to clear it.
    pub role_label: Option<Option<String>>,
    /// New weekly hours cap.
    pub max_weekly_hours: Option<f64>,
    /// Activate or deactivate.
    pub active: Option<bool>,
}

impl EmployeePatch {
    /// Merges this patch over `current`, returning the candidate
    /// employee record.
    #[must_use]
    pub fn apply(&self, current: &Employee) -> Employee {
        Employee {
            id: current.id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            phone: self
                .phone
                .clone()
                .unwrap_or_else(|| current.phone.clone()),
            role_label: self
                .role_label
                .clone()
                .unwrap_or_else(|| current.role_label.clone()),
            max_weekly_hours: self.max_weekly_hours.unwrap_or(current.max_weekly_hours),
            active: self.active.unwrap_or(current.active),
            user_id: current.user_id,
        }
    }
}
