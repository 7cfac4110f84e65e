// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Advisory conflict scanning for the dashboard.
//!
//! Alerts never block a write; the hard guards live in the schedule
//! and workflow modules. These scans run over already-loaded slices
//! and report what a manager should look at.

use rota_domain::{intervals_overlap, Employee, Shift, ShiftStatus, Shop};
use serde::Serialize;
use std::collections::HashMap;
use time::{Date, Duration};

/// How urgent an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Informational; no schedule defect.
    Info,
    /// Worth reviewing.
    Warning,
    /// A schedule defect that needs fixing.
    Danger,
}

/// What kind of condition an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Two non-cancelled shifts for one employee overlap in time.
    DoubleBooking,
    /// A shop has a day with no scheduled coverage.
    Uncovered,
    /// An employee's scheduled minutes exceed their weekly cap.
    OverHours,
    /// Release requests are waiting on a manager or a claimer.
    PendingReleases,
    /// Time-off requests are waiting on a manager decision.
    PendingTimeOff,
}

/// One advisory finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// The condition detected.
    pub kind: AlertKind,
    /// How urgent it is.
    pub severity: AlertSeverity,
    /// Human-readable description.
    pub message: String,
    /// The date the finding is anchored to, when there is one.
    pub date: Option<Date>,
    /// The employee involved, when there is one.
    pub employee_id: Option<i64>,
    /// The shop involved, when there is one.
    pub shop_id: Option<i64>,
}

/// Returns the Monday and Sunday of the week containing `date`.
///
/// Weeks run Monday through Sunday for the over-hours accounting.
#[must_use]
pub fn week_containing(date: Date) -> (Date, Date) {
    let days_from_monday = i64::from(date.weekday().number_days_from_monday());
    let monday = date.saturating_sub(Duration::days(days_from_monday));
    let sunday = monday.saturating_add(Duration::days(6));
    (monday, sunday)
}

fn is_countable(shift: &Shift) -> bool {
    shift.status != ShiftStatus::Cancelled
}

/// Scans for pairs of non-cancelled shifts that overlap for the same
/// employee on the same date.
///
/// These can only arise from forced writes or data imported from
/// elsewhere; the write-path guard normally prevents them.
#[must_use]
pub fn double_booking_alerts(shifts: &[Shift]) -> Vec<Alert> {
    let mut by_employee_date: HashMap<(i64, Date), Vec<&Shift>> = HashMap::new();
    for shift in shifts.iter().filter(|s| is_countable(s)) {
        if let Some(employee_id) = shift.employee_id {
            by_employee_date
                .entry((employee_id, shift.date))
                .or_default()
                .push(shift);
        }
    }

    let mut alerts: Vec<Alert> = Vec::new();
    for ((employee_id, date), group) in &by_employee_date {
        for (i, first) in group.iter().enumerate() {
            for second in &group[i + 1..] {
                if intervals_overlap(first.start, first.end, second.start, second.end) {
                    alerts.push(Alert {
                        kind: AlertKind::DoubleBooking,
                        severity: AlertSeverity::Danger,
                        message: format!(
                            "Employee {employee_id} is double-booked on {date}: {} - {} overlaps {} - {}",
                            first.start, first.end, second.start, second.end
                        ),
                        date: Some(*date),
                        employee_id: Some(*employee_id),
                        shop_id: None,
                    });
                }
            }
        }
    }

    alerts.sort_by(|a, b| (a.date, a.employee_id).cmp(&(b.date, b.employee_id)));
    alerts
}

/// Scans the seven days starting at `from` for active shops with no
/// scheduled coverage on a day.
#[must_use]
pub fn uncovered_shop_alerts(shops: &[Shop], shifts: &[Shift], from: Date) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = Vec::new();

    for offset in 0..7 {
        let day = from.saturating_add(Duration::days(offset));
        for shop in shops.iter().filter(|s| s.active) {
            let covered = shifts.iter().any(|shift| {
                is_countable(shift) && shift.date == day && shop.id == Some(shift.shop_id)
            });
            if !covered {
                alerts.push(Alert {
                    kind: AlertKind::Uncovered,
                    severity: AlertSeverity::Warning,
                    message: format!("{} has no shifts scheduled on {day}", shop.name),
                    date: Some(day),
                    employee_id: None,
                    shop_id: shop.id,
                });
            }
        }
    }

    alerts
}

/// Scans for employees whose scheduled minutes in any Monday-Sunday
/// week exceed their weekly cap.
///
/// Cancelled shifts and open shifts do not count toward the total.
#[must_use]
pub fn over_hours_alerts(employees: &[Employee], shifts: &[Shift]) -> Vec<Alert> {
    let caps: HashMap<i64, (&str, f64)> = employees
        .iter()
        .filter_map(|e| e.id.map(|id| (id, (e.name.as_str(), e.max_weekly_hours))))
        .collect();

    let mut minutes_by_week: HashMap<(i64, Date), i64> = HashMap::new();
    for shift in shifts.iter().filter(|s| is_countable(s)) {
        if let Some(employee_id) = shift.employee_id {
            let (monday, _) = week_containing(shift.date);
            *minutes_by_week.entry((employee_id, monday)).or_insert(0) +=
                shift.duration_minutes();
        }
    }

    let mut alerts: Vec<Alert> = Vec::new();
    for ((employee_id, monday), minutes) in &minutes_by_week {
        let Some((name, cap_hours)) = caps.get(employee_id) else {
            continue;
        };
        #[allow(clippy::cast_precision_loss)]
        let scheduled_hours = *minutes as f64 / 60.0;
        if scheduled_hours > *cap_hours {
            alerts.push(Alert {
                kind: AlertKind::OverHours,
                severity: AlertSeverity::Warning,
                message: format!(
                    "{name} is scheduled for {scheduled_hours:.1}h in the week of {monday} (cap {cap_hours:.1}h)"
                ),
                date: Some(*monday),
                employee_id: Some(*employee_id),
                shop_id: None,
            });
        }
    }

    alerts.sort_by(|a, b| (a.date, a.employee_id).cmp(&(b.date, b.employee_id)));
    alerts
}

/// Summarizes outstanding workflow items into informational alerts.
#[must_use]
pub fn pending_workflow_alerts(pending_releases: usize, pending_time_off: usize) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = Vec::new();

    if pending_releases > 0 {
        alerts.push(Alert {
            kind: AlertKind::PendingReleases,
            severity: AlertSeverity::Info,
            message: format!("{pending_releases} release request(s) awaiting action"),
            date: None,
            employee_id: None,
            shop_id: None,
        });
    }

    if pending_time_off > 0 {
        alerts.push(Alert {
            kind: AlertKind::PendingTimeOff,
            severity: AlertSeverity::Info,
            message: format!("{pending_time_off} time-off request(s) awaiting review"),
            date: None,
            employee_id: None,
            shop_id: None,
        });
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Weekday;

    #[test]
    fn test_week_runs_monday_to_sunday() {
        // 2026-01-07 is a Wednesday.
        let (monday, sunday) = week_containing(date!(2026 - 01 - 07));
        assert_eq!(monday, date!(2026 - 01 - 05));
        assert_eq!(sunday, date!(2026 - 01 - 11));
        assert_eq!(monday.weekday(), Weekday::Monday);

        // A Monday maps to itself.
        let (m, _) = week_containing(date!(2026 - 01 - 05));
        assert_eq!(m, date!(2026 - 01 - 05));

        // A Sunday belongs to the week started six days earlier.
        let (m, s) = week_containing(date!(2026 - 01 - 11));
        assert_eq!(m, date!(2026 - 01 - 05));
        assert_eq!(s, date!(2026 - 01 - 11));
    }
}
