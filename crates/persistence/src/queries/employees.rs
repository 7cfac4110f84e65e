// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, params};
use rota_domain::Employee;

use crate::error::PersistenceError;
use crate::rows::employee_from_parts;

const EMPLOYEE_COLUMNS: &str =
    "employee_id, name, phone, role_label, max_weekly_hours, is_active, user_id";

/// Lists employees by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_employees(
    conn: &Connection,
    include_inactive: bool,
) -> Result<Vec<Employee>, PersistenceError> {
    let sql = if include_inactive {
        format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY is_active DESC, name")
    } else {
        format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE is_active = 1 ORDER BY name")
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
        ))
    })?;

    let mut employees: Vec<Employee> = Vec::new();
    for row in rows {
        employees.push(employee_from_parts(row?));
    }
    Ok(employees)
}

/// Retrieves an employee by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the employee does not
/// exist.
pub fn get_employee(conn: &Connection, employee_id: i64) -> Result<Employee, PersistenceError> {
    let parts = conn
        .query_row(
            &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_id = ?1"),
            params![employee_id],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                ))
            },
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                PersistenceError::NotFound(format!("Employee {employee_id} not found"))
            }
            other => other.into(),
        })?;

    Ok(employee_from_parts(parts))
}
