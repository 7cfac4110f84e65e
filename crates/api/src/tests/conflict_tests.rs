// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::{date, time};

use rota::AlertKind;

use crate::conflicts::list_conflicts;
use crate::handlers::release_shift;
use crate::tests::helpers::{
    release_request, seed_default_shift, seed_employee, seed_shift_on, seed_shop, setup, staff,
    time_off_request,
};

#[test]
fn test_quiet_week_reports_only_coverage_gaps() {
    let persistence = setup();
    seed_shop(&persistence, "Riverside");

    let report =
        list_conflicts(&persistence, date!(2026 - 01 - 05)).expect("conflict scan succeeds");

    // One active shop with no shifts: a gap for each of the 7 days,
    // nothing else.
    assert_eq!(report.alerts.len(), 7);
    assert!(
        report
            .alerts
            .iter()
            .all(|a| a.kind == AlertKind::Uncovered)
    );
}

#[test]
fn test_double_booking_is_reported() {
    let persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let dana = seed_employee(&persistence, "Dana");
    seed_default_shift(&persistence, dana, shop_id);
    seed_shift_on(
        &persistence,
        dana,
        shop_id,
        date!(2026 - 01 - 05),
        time!(16:00),
        time!(20:00),
    );

    let report =
        list_conflicts(&persistence, date!(2026 - 01 - 05)).expect("conflict scan succeeds");

    let double_bookings: Vec<_> = report
        .alerts
        .iter()
        .filter(|a| a.kind == AlertKind::DoubleBooking)
        .collect();
    assert_eq!(double_bookings.len(), 1);
    assert_eq!(double_bookings[0].employee_id, Some(dana));
    assert_eq!(double_bookings[0].date, Some(date!(2026 - 01 - 05)));
}

#[test]
fn test_over_hours_counts_the_whole_week_even_outside_the_window() {
    let persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let dana = seed_employee(&persistence, "Dana");

    // Five 9-hour days starting Monday put Dana at 45 hours against a
    // 40-hour cap. Scanning from Thursday must still see the whole
    // Monday-to-Sunday week.
    for offset in 0..5 {
        seed_shift_on(
            &persistence,
            dana,
            shop_id,
            date!(2026 - 01 - 05).saturating_add(time::Duration::days(offset)),
            time!(08:00),
            time!(17:00),
        );
    }

    let report =
        list_conflicts(&persistence, date!(2026 - 01 - 08)).expect("conflict scan succeeds");
    assert!(
        report
            .alerts
            .iter()
            .any(|a| a.kind == AlertKind::OverHours && a.employee_id == Some(dana))
    );
}

#[test]
fn test_pending_workflow_items_surface_as_info_alerts() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let dana = seed_employee(&persistence, "Dana");
    let shift_id = seed_default_shift(&persistence, dana, shop_id);

    release_shift(
        &mut persistence,
        &staff(2, dana),
        &release_request(shift_id, dana),
    )
    .expect("release created");
    crate::handlers::create_time_off(
        &mut persistence,
        &staff(2, dana),
        &time_off_request(dana, "2026-02-02", "2026-02-06"),
    )
    .expect("time off created");

    let report =
        list_conflicts(&persistence, date!(2026 - 01 - 05)).expect("conflict scan succeeds");
    assert!(
        report
            .alerts
            .iter()
            .any(|a| a.kind == AlertKind::PendingReleases)
    );
    assert!(
        report
            .alerts
            .iter()
            .any(|a| a.kind == AlertKind::PendingTimeOff)
    );
}
