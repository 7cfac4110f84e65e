// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard conflict report: runs the alert scans over a window of
//! schedule data.

use time::{Date, Duration};

use rota::{
    Alert, double_booking_alerts, over_hours_alerts, pending_workflow_alerts,
    uncovered_shop_alerts, week_containing,
};
use rota_persistence::{Persistence, queries};

use crate::error::ApiError;
use crate::request_response::ConflictReport;

/// Builds the conflict report for the seven days starting at `from`.
///
/// The shift window is widened to cover the full Monday-to-Sunday
/// weeks the range touches, so the weekly hours scan sees every shift
/// that counts toward a cap.
///
/// # Errors
///
/// Returns an error if any of the underlying queries fail.
pub fn list_conflicts(persistence: &Persistence, from: Date) -> Result<ConflictReport, ApiError> {
    let window_end: Date = from.saturating_add(Duration::days(6));
    let (first_monday, _) = week_containing(from);
    let (_, last_sunday) = week_containing(window_end);

    let conn = persistence.connection();
    let shifts = queries::list_shifts_in_range(conn, first_monday, last_sunday)?;
    let employees = queries::list_employees(conn, false)?;
    let shops = queries::list_shops(conn, false)?;

    let pending_releases: usize =
        usize::try_from(queries::count_active_releases(conn)?).unwrap_or(0);
    let pending_time_off: usize =
        usize::try_from(queries::count_pending_time_off(conn)?).unwrap_or(0);

    let mut alerts: Vec<Alert> = double_booking_alerts(&shifts);
    alerts.extend(uncovered_shop_alerts(&shops, &shifts, from));
    alerts.extend(over_hours_alerts(&employees, &shifts));
    alerts.extend(pending_workflow_alerts(pending_releases, pending_time_off));

    Ok(ConflictReport { alerts })
}
