// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Identity, Role};
use rota_domain::{Employee, ReleaseRequest, Shift, TimeOffRequest, TimeOffStatus, TimeOffType};
use time::macros::{date, time};
use time::{Date, Time};

pub fn manager() -> Identity {
    Identity::new(1, Role::Manager, None)
}

pub fn staff(user_id: i64, employee_id: i64) -> Identity {
    Identity::new(user_id, Role::Staff, Some(employee_id))
}

pub fn shift_for(employee_id: i64, id: i64) -> Shift {
    shift_on(employee_id, id, date!(2026 - 01 - 05), time!(09:00), time!(17:00))
}

pub fn shift_on(employee_id: i64, id: i64, date: Date, start: Time, end: Time) -> Shift {
    let mut shift = Shift::new(Some(employee_id), 1, date, start, end, String::new());
    shift.id = Some(id);
    shift
}

pub fn pending_release(shift_id: i64, requester_id: i64, id: i64) -> ReleaseRequest {
    let mut request = ReleaseRequest::new(shift_id, requester_id, String::from("covering needed"));
    request.id = Some(id);
    request
}

pub fn employee(id: i64, name: &str, max_weekly_hours: f64) -> Employee {
    let mut e = Employee::new(String::from(name), None, None, max_weekly_hours);
    e.id = Some(id);
    e
}

pub fn approved_time_off(employee_id: i64, from: Date, to: Date) -> TimeOffRequest {
    let mut request =
        TimeOffRequest::new(employee_id, from, to, TimeOffType::Vacation, String::new());
    request.id = Some(1);
    request.status = TimeOffStatus::Approved;
    request
}
