// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use time::macros::{date, time};
use time::{Date, Time};

use rota_domain::{Employee, Shift, Shop};

use crate::Persistence;
use crate::mutations::{insert_employee, insert_shift, insert_shop};

pub fn open() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should open")
}

pub fn seed_shop(conn: &Connection, name: &str) -> i64 {
    let shop = Shop {
        id: None,
        name: String::from(name),
        color: String::from("#6366f1"),
        active: true,
    };
    insert_shop(conn, &shop).expect("shop insert should succeed")
}

pub fn seed_employee(conn: &Connection, name: &str) -> i64 {
    let employee = Employee::new(String::from(name), None, None, 40.0);
    insert_employee(conn, &employee).expect("employee insert should succeed")
}

pub fn seed_shift(
    conn: &Connection,
    employee_id: i64,
    shop_id: i64,
    date: Date,
    start: Time,
    end: Time,
) -> i64 {
    let shift = Shift::new(Some(employee_id), shop_id, date, start, end, String::new());
    insert_shift(conn, &shift).expect("shift insert should succeed")
}

pub fn seed_default_shift(conn: &Connection, employee_id: i64, shop_id: i64) -> i64 {
    seed_shift(
        conn,
        employee_id,
        shop_id,
        date!(2026 - 01 - 05),
        time!(09:00),
        time!(17:00),
    )
}
