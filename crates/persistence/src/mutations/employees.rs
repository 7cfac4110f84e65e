// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, params};
use rota_domain::Employee;

use crate::error::PersistenceError;

/// Inserts an employee and returns the assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_employee(conn: &Connection, employee: &Employee) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO employees (name, phone, role_label, max_weekly_hours, is_active, user_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            employee.name,
            employee.phone,
            employee.role_label,
            employee.max_weekly_hours,
            i64::from(employee.active),
            employee.user_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Updates an employee record in place.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the employee does not
/// exist.
pub fn update_employee(
    conn: &Connection,
    employee_id: i64,
    employee: &Employee,
) -> Result<(), PersistenceError> {
    let changed = conn.execute(
        "UPDATE employees
         SET name = ?1, phone = ?2, role_label = ?3, max_weekly_hours = ?4,
             is_active = ?5, user_id = ?6
         WHERE employee_id = ?7",
        params![
            employee.name,
            employee.phone,
            employee.role_label,
            employee.max_weekly_hours,
            i64::from(employee.active),
            employee.user_id,
            employee_id,
        ],
    )?;

    if changed == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Employee {employee_id} not found"
        )));
    }
    Ok(())
}
