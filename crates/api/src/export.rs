// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll hours export.

use std::collections::HashMap;

use time::Date;

use rota_domain::{ShiftStatus, validate_date_range};
use rota_persistence::{Persistence, queries};

use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::error::ApiError;
use crate::request_response::{HoursExportRequest, HoursReport, HoursRow, parse_date_field};

/// Aggregates worked hours per employee over a date range. Manager
/// only.
///
/// Cancelled shifts and open shifts never count. Without a shop
/// filter the report lists every active employee, zero rows
/// included; with one, only employees who worked at that shop
/// appear. Rows are ordered by employee name.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a backwards date range.
pub fn export_hours(
    persistence: &Persistence,
    user: &AuthenticatedUser,
    request: &HoursExportRequest,
) -> Result<HoursReport, ApiError> {
    AuthorizationService::require_manager(user, "export_hours")?;

    let date_from: Date = parse_date_field(&request.date_from, "date_from")?;
    let date_to: Date = parse_date_field(&request.date_to, "date_to")?;
    validate_date_range(date_from, date_to)?;

    let conn = persistence.connection();
    let shifts = queries::list_shifts_in_range(conn, date_from, date_to)?;
    let employees = queries::list_employees(conn, false)?;

    let mut totals: HashMap<i64, (u32, i64)> = HashMap::new();
    for shift in shifts
        .iter()
        .filter(|s| s.status != ShiftStatus::Cancelled)
        .filter(|s| request.shop_id.is_none_or(|shop_id| s.shop_id == shop_id))
    {
        if let Some(employee_id) = shift.employee_id {
            let entry = totals.entry(employee_id).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += shift.duration_minutes();
        }
    }

    let mut rows: Vec<HoursRow> = Vec::new();
    for employee in &employees {
        let Some(employee_id) = employee.id else {
            continue;
        };
        let (shift_count, total_minutes) = totals.get(&employee_id).copied().unwrap_or((0, 0));
        if request.shop_id.is_some() && shift_count == 0 {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        let total_hours: f64 = total_minutes as f64 / 60.0;
        rows.push(HoursRow {
            employee_id,
            name: employee.name.clone(),
            shift_count,
            total_minutes,
            total_hours,
        });
    }
    rows.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(HoursReport {
        date_from: request.date_from.clone(),
        date_to: request.date_to.clone(),
        rows,
    })
}

/// Renders an hours report as CSV bytes with a header row.
///
/// # Errors
///
/// Returns `ApiError::Internal` if serialization fails.
pub fn hours_report_to_csv(report: &HoursReport) -> Result<Vec<u8>, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "employee_id",
            "name",
            "shift_count",
            "total_minutes",
            "total_hours",
        ])
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to write CSV header: {e}"),
        })?;

    for row in &report.rows {
        writer
            .write_record([
                row.employee_id.to_string(),
                row.name.clone(),
                row.shift_count.to_string(),
                row.total_minutes.to_string(),
                format!("{:.2}", row.total_hours),
            ])
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to write CSV row: {e}"),
            })?;
    }

    writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to finish CSV output: {e}"),
    })
}
