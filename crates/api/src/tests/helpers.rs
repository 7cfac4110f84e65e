// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the API handler tests.

use rota::Role;
use rota_domain::{Employee, Shift, Shop};
use rota_persistence::{Persistence, mutations};
use time::macros::{date, time};
use time::{Date, Time};

use crate::auth::AuthenticatedUser;
use crate::request_response::{CreateShiftRequest, CreateTimeOffRequest, ReleaseShiftRequest};

// Low bcrypt cost keeps login tests fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn setup() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn manager() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 1,
        username: String::from("boss"),
        role: Role::Manager,
        employee_id: None,
    }
}

pub fn staff(user_id: i64, employee_id: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id,
        username: format!("staff{user_id}"),
        role: Role::Staff,
        employee_id: Some(employee_id),
    }
}

pub fn seed_shop(persistence: &Persistence, name: &str) -> i64 {
    let shop = Shop {
        id: None,
        name: name.to_string(),
        color: String::from("#6366f1"),
        active: true,
    };
    mutations::insert_shop(persistence.connection(), &shop).expect("insert shop")
}

pub fn seed_employee(persistence: &Persistence, name: &str) -> i64 {
    let employee = Employee::new(name.to_string(), None, None, 40.0);
    mutations::insert_employee(persistence.connection(), &employee).expect("insert employee")
}

pub fn seed_shift_on(
    persistence: &Persistence,
    employee_id: i64,
    shop_id: i64,
    date: Date,
    start: Time,
    end: Time,
) -> i64 {
    let shift = Shift::new(Some(employee_id), shop_id, date, start, end, String::new());
    mutations::insert_shift(persistence.connection(), &shift).expect("insert shift")
}

/// Seeds a shift for 2026-01-05 09:00-17:00, the workhorse fixture.
pub fn seed_default_shift(persistence: &Persistence, employee_id: i64, shop_id: i64) -> i64 {
    seed_shift_on(
        persistence,
        employee_id,
        shop_id,
        date!(2026 - 01 - 05),
        time!(09:00),
        time!(17:00),
    )
}

pub fn create_shift_request(employee_id: i64, shop_id: i64) -> CreateShiftRequest {
    CreateShiftRequest {
        employee_id: Some(employee_id),
        shop_id,
        date: String::from("2026-01-05"),
        start: String::from("09:00"),
        end: String::from("17:00"),
        notes: None,
        force: false,
    }
}

pub fn time_off_request(employee_id: i64, from: &str, to: &str) -> CreateTimeOffRequest {
    CreateTimeOffRequest {
        employee_id: Some(employee_id),
        date_from: from.to_string(),
        date_to: to.to_string(),
        kind: String::from("vacation"),
        reason: None,
    }
}

pub fn release_request(shift_id: i64, employee_id: i64) -> ReleaseShiftRequest {
    ReleaseShiftRequest {
        shift_id,
        employee_id: Some(employee_id),
        message: Some(String::from("can't make it")),
    }
}
