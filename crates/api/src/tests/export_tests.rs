// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::{date, time};

use crate::error::ApiError;
use crate::export::{export_hours, hours_report_to_csv};
use crate::handlers::cancel_shift;
use crate::request_response::HoursExportRequest;
use crate::tests::helpers::{manager, seed_employee, seed_shift_on, seed_shop, setup, staff};

fn range(shop_id: Option<i64>) -> HoursExportRequest {
    HoursExportRequest {
        date_from: String::from("2026-01-05"),
        date_to: String::from("2026-01-11"),
        shop_id,
    }
}

#[test]
fn test_totals_per_employee_ordered_by_name() {
    let persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let zoe = seed_employee(&persistence, "Zoe");
    let dana = seed_employee(&persistence, "Dana");

    seed_shift_on(
        &persistence,
        zoe,
        shop_id,
        date!(2026 - 01 - 05),
        time!(09:00),
        time!(17:00),
    );
    seed_shift_on(
        &persistence,
        dana,
        shop_id,
        date!(2026 - 01 - 05),
        time!(09:00),
        time!(13:30),
    );
    seed_shift_on(
        &persistence,
        dana,
        shop_id,
        date!(2026 - 01 - 06),
        time!(09:00),
        time!(13:30),
    );

    let report = export_hours(&persistence, &manager(), &range(None)).expect("export succeeds");

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].name, "Dana");
    assert_eq!(report.rows[0].shift_count, 2);
    assert_eq!(report.rows[0].total_minutes, 540);
    assert!((report.rows[0].total_hours - 9.0).abs() < f64::EPSILON);
    assert_eq!(report.rows[1].name, "Zoe");
    assert_eq!(report.rows[1].total_minutes, 480);
}

#[test]
fn test_cancelled_shifts_do_not_count() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let dana = seed_employee(&persistence, "Dana");

    let shift_id = seed_shift_on(
        &persistence,
        dana,
        shop_id,
        date!(2026 - 01 - 05),
        time!(09:00),
        time!(17:00),
    );
    cancel_shift(&mut persistence, &manager(), shift_id).expect("cancel fixture");

    let report = export_hours(&persistence, &manager(), &range(None)).expect("export succeeds");
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].shift_count, 0);
    assert_eq!(report.rows[0].total_minutes, 0);
}

#[test]
fn test_shop_filter_omits_employees_without_matching_shifts() {
    let persistence = setup();
    let riverside = seed_shop(&persistence, "Riverside");
    let harbor = seed_shop(&persistence, "Harbor");
    let dana = seed_employee(&persistence, "Dana");
    seed_employee(&persistence, "Eli");

    seed_shift_on(
        &persistence,
        dana,
        riverside,
        date!(2026 - 01 - 05),
        time!(09:00),
        time!(17:00),
    );

    let unfiltered =
        export_hours(&persistence, &manager(), &range(None)).expect("export succeeds");
    assert_eq!(unfiltered.rows.len(), 2);

    let filtered =
        export_hours(&persistence, &manager(), &range(Some(riverside))).expect("export succeeds");
    assert_eq!(filtered.rows.len(), 1);
    assert_eq!(filtered.rows[0].name, "Dana");

    let empty =
        export_hours(&persistence, &manager(), &range(Some(harbor))).expect("export succeeds");
    assert!(empty.rows.is_empty());
}

#[test]
fn test_export_is_manager_only() {
    let persistence = setup();
    let dana = seed_employee(&persistence, "Dana");

    let err = export_hours(&persistence, &staff(2, dana), &range(None))
        .expect_err("staff cannot export");
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_csv_rendering_includes_header_and_rows() {
    let persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let dana = seed_employee(&persistence, "Dana");
    seed_shift_on(
        &persistence,
        dana,
        shop_id,
        date!(2026 - 01 - 05),
        time!(09:00),
        time!(17:30),
    );

    let report = export_hours(&persistence, &manager(), &range(None)).expect("export succeeds");
    let bytes = hours_report_to_csv(&report).expect("csv renders");
    let text = String::from_utf8(bytes).expect("valid utf-8");

    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("employee_id,name,shift_count,total_minutes,total_hours")
    );
    let row = lines.next().expect("one data row");
    assert!(row.contains("Dana"));
    assert!(row.contains("510"));
    assert!(row.contains("8.50"));
}

#[test]
fn test_csv_for_an_empty_report_still_has_the_header() {
    let persistence = setup();

    let report = export_hours(&persistence, &manager(), &range(None)).expect("export succeeds");
    let bytes = hours_report_to_csv(&report).expect("csv renders");
    let text = String::from_utf8(bytes).expect("valid utf-8");
    assert_eq!(
        text.trim_end(),
        "employee_id,name,shift_count,total_minutes,total_hours"
    );
}
