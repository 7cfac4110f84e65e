// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::{date, time};

use rota_persistence::queries;

use crate::error::ApiError;
use crate::handlers::{
    assign_shift, cancel_shift, create_shift, generate_template_shifts, list_shifts, release_shift,
    update_shift,
};
use crate::request_response::{
    AssignShiftRequest, CreateShiftRequest, ShiftFilter, TemplateRequest, TemplateSlot,
    UpdateShiftRequest,
};
use crate::tests::helpers::{
    create_shift_request, manager, release_request, seed_default_shift, seed_employee, seed_shop,
    seed_shift_on, setup, staff, time_off_request,
};

#[test]
fn test_create_shift_round_trip() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");

    let response = create_shift(
        &mut persistence,
        &manager(),
        &create_shift_request(employee_id, shop_id),
    )
    .expect("shift created");

    assert_eq!(response.employee_id, Some(employee_id));
    assert_eq!(response.date, "2026-01-05");
    assert_eq!(response.start, "09:00");
    assert_eq!(response.end, "17:00");
    assert_eq!(response.status, "scheduled");
    assert!(!response.unassigned);
}

#[test]
fn test_staff_cannot_create_shifts() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");

    let err = create_shift(
        &mut persistence,
        &staff(2, employee_id),
        &create_shift_request(employee_id, shop_id),
    )
    .expect_err("staff rejected");
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_overlap_is_rejected_with_shop_detail() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");
    seed_default_shift(&persistence, employee_id, shop_id);

    let mut request = create_shift_request(employee_id, shop_id);
    request.start = String::from("16:00");
    request.end = String::from("20:00");

    let err = create_shift(&mut persistence, &manager(), &request)
        .expect_err("overlapping shift rejected");
    match err {
        ApiError::ScheduleConflict { message } => {
            assert!(message.contains("Riverside"), "got: {message}");
        }
        other => panic!("expected schedule conflict, got {other:?}"),
    }
}

#[test]
fn test_force_never_overrides_an_overlap() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");
    seed_default_shift(&persistence, employee_id, shop_id);

    let mut request = create_shift_request(employee_id, shop_id);
    request.force = true;

    let err = create_shift(&mut persistence, &manager(), &request)
        .expect_err("force does not bypass overlap");
    assert!(matches!(err, ApiError::ScheduleConflict { .. }));
}

#[test]
fn test_back_to_back_shifts_are_allowed() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");
    seed_default_shift(&persistence, employee_id, shop_id);

    let mut request = create_shift_request(employee_id, shop_id);
    request.start = String::from("17:00");
    request.end = String::from("21:00");

    create_shift(&mut persistence, &manager(), &request).expect("touching shift allowed");
}

#[test]
fn test_approved_time_off_blocks_unless_forced() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");

    let time_off = crate::handlers::create_time_off(
        &mut persistence,
        &manager(),
        &time_off_request(employee_id, "2026-01-05", "2026-01-06"),
    )
    .expect("time off created");
    crate::handlers::approve_time_off(&mut persistence, &manager(), time_off.id)
        .expect("time off approved");

    let err = create_shift(
        &mut persistence,
        &manager(),
        &create_shift_request(employee_id, shop_id),
    )
    .expect_err("blocked by approved time off");
    assert!(matches!(err, ApiError::TimeOffConflict { .. }));

    let mut forced = create_shift_request(employee_id, shop_id);
    forced.force = true;
    create_shift(&mut persistence, &manager(), &forced).expect("force overrides the block");
}

#[test]
fn test_inverted_time_range_is_invalid_input() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");

    let mut request = create_shift_request(employee_id, shop_id);
    request.start = String::from("17:00");
    request.end = String::from("09:00");

    let err = create_shift(&mut persistence, &manager(), &request)
        .expect_err("backwards range rejected");
    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_unknown_shop_is_not_found() {
    let mut persistence = setup();
    let employee_id = seed_employee(&persistence, "Dana");

    let err = create_shift(
        &mut persistence,
        &manager(),
        &create_shift_request(employee_id, 99),
    )
    .expect_err("unknown shop rejected");
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[test]
fn test_update_shift_checks_overlap_excluding_itself() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");
    let shift_id = seed_default_shift(&persistence, employee_id, shop_id);

    // Shrinking a shift overlaps only itself, which must not count.
    let response = update_shift(
        &mut persistence,
        &manager(),
        shift_id,
        &UpdateShiftRequest {
            end: Some(String::from("15:00")),
            ..UpdateShiftRequest::default()
        },
    )
    .expect("shrinking a shift is fine");
    assert_eq!(response.end, "15:00");

    // Moving it onto a second shift still conflicts.
    seed_shift_on(
        &persistence,
        employee_id,
        shop_id,
        date!(2026 - 01 - 06),
        time!(09:00),
        time!(17:00),
    );
    let err = update_shift(
        &mut persistence,
        &manager(),
        shift_id,
        &UpdateShiftRequest {
            date: Some(String::from("2026-01-06")),
            ..UpdateShiftRequest::default()
        },
    )
    .expect_err("moving onto an existing shift conflicts");
    assert!(matches!(err, ApiError::ScheduleConflict { .. }));
}

#[test]
fn test_clearing_the_owner_makes_the_shift_open() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");
    let shift_id = seed_default_shift(&persistence, employee_id, shop_id);

    let response = update_shift(
        &mut persistence,
        &manager(),
        shift_id,
        &UpdateShiftRequest {
            clear_employee: true,
            ..UpdateShiftRequest::default()
        },
    )
    .expect("owner cleared");
    assert_eq!(response.employee_id, None);
    assert!(response.unassigned);
}

#[test]
fn test_cancel_shift_cascades_to_its_active_release() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");
    let shift_id = seed_default_shift(&persistence, employee_id, shop_id);

    let release = release_shift(
        &mut persistence,
        &staff(2, employee_id),
        &release_request(shift_id, employee_id),
    )
    .expect("release created");

    cancel_shift(&mut persistence, &manager(), shift_id).expect("shift cancelled");

    let stored = queries::get_release(persistence.connection(), release.id)
        .expect("release still exists");
    assert_eq!(stored.status.as_str(), "cancelled");
}

#[test]
fn test_cancelling_twice_is_invalid_state() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");
    let shift_id = seed_default_shift(&persistence, employee_id, shop_id);

    cancel_shift(&mut persistence, &manager(), shift_id).expect("first cancel succeeds");
    let err = cancel_shift(&mut persistence, &manager(), shift_id)
        .expect_err("second cancel rejected");
    assert!(matches!(err, ApiError::InvalidState { .. }));
}

#[test]
fn test_cancelled_shift_no_longer_conflicts() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");
    let shift_id = seed_default_shift(&persistence, employee_id, shop_id);

    cancel_shift(&mut persistence, &manager(), shift_id).expect("shift cancelled");
    create_shift(
        &mut persistence,
        &manager(),
        &create_shift_request(employee_id, shop_id),
    )
    .expect("same interval schedulable again");
}

#[test]
fn test_assign_open_shift_runs_the_conflict_gate() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");
    let employee_id = seed_employee(&persistence, "Dana");
    seed_default_shift(&persistence, employee_id, shop_id);

    let open = create_shift(
        &mut persistence,
        &manager(),
        &CreateShiftRequest {
            employee_id: None,
            shop_id,
            date: String::from("2026-01-05"),
            start: String::from("10:00"),
            end: String::from("14:00"),
            notes: None,
            force: false,
        },
    )
    .expect("open shift created");
    assert!(open.unassigned);

    let err = assign_shift(
        &mut persistence,
        &manager(),
        open.id,
        &AssignShiftRequest {
            employee_id,
            force: false,
        },
    )
    .expect_err("assignment overlaps Dana's existing shift");
    assert!(matches!(err, ApiError::ScheduleConflict { .. }));

    let other = seed_employee(&persistence, "Eli");
    let assigned = assign_shift(
        &mut persistence,
        &manager(),
        open.id,
        &AssignShiftRequest {
            employee_id: other,
            force: false,
        },
    )
    .expect("assignment to a free employee succeeds");
    assert_eq!(assigned.employee_id, Some(other));
    assert!(!assigned.unassigned);
}

#[test]
fn test_template_generates_open_shifts_per_matching_weekday() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");

    // 2026-01-05 is a Monday; two weeks have two Mondays and two
    // Tuesdays.
    let response = generate_template_shifts(
        &mut persistence,
        &manager(),
        &TemplateRequest {
            shop_id,
            date_from: String::from("2026-01-05"),
            date_to: String::from("2026-01-18"),
            slots: vec![
                TemplateSlot {
                    weekday: 1,
                    start: String::from("09:00"),
                    end: String::from("17:00"),
                    count: 2,
                },
                TemplateSlot {
                    weekday: 2,
                    start: String::from("09:00"),
                    end: String::from("13:00"),
                    count: 1,
                },
            ],
        },
    )
    .expect("template generated");
    assert_eq!(response.created, 6);

    let listed = list_shifts(
        &persistence,
        &ShiftFilter {
            date_from: String::from("2026-01-05"),
            date_to: String::from("2026-01-18"),
            shop_id: None,
            employee_id: None,
            include_cancelled: false,
        },
    )
    .expect("listing succeeds");
    assert_eq!(listed.len(), 6);
    assert!(listed.iter().all(|s| s.unassigned));
}

#[test]
fn test_template_rejects_an_inverted_slot() {
    let mut persistence = setup();
    let shop_id = seed_shop(&persistence, "Riverside");

    let err = generate_template_shifts(
        &mut persistence,
        &manager(),
        &TemplateRequest {
            shop_id,
            date_from: String::from("2026-01-05"),
            date_to: String::from("2026-01-11"),
            slots: vec![TemplateSlot {
                weekday: 1,
                start: String::from("17:00"),
                end: String::from("09:00"),
                count: 1,
            }],
        },
    )
    .expect_err("inverted slot rejected");
    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_list_shifts_filters() {
    let mut persistence = setup();
    let shop_a = seed_shop(&persistence, "Riverside");
    let shop_b = seed_shop(&persistence, "Harbor");
    let dana = seed_employee(&persistence, "Dana");
    let eli = seed_employee(&persistence, "Eli");

    let cancelled_id = seed_default_shift(&persistence, dana, shop_a);
    cancel_shift(&mut persistence, &manager(), cancelled_id).expect("cancel fixture");
    seed_shift_on(
        &persistence,
        dana,
        shop_a,
        date!(2026 - 01 - 06),
        time!(09:00),
        time!(17:00),
    );
    seed_shift_on(
        &persistence,
        eli,
        shop_b,
        date!(2026 - 01 - 06),
        time!(09:00),
        time!(17:00),
    );

    let filter = |shop_id, employee_id, include_cancelled| ShiftFilter {
        date_from: String::from("2026-01-05"),
        date_to: String::from("2026-01-11"),
        shop_id,
        employee_id,
        include_cancelled,
    };

    assert_eq!(
        list_shifts(&persistence, &filter(None, None, false))
            .expect("list")
            .len(),
        2
    );
    assert_eq!(
        list_shifts(&persistence, &filter(None, None, true))
            .expect("list")
            .len(),
        3
    );
    assert_eq!(
        list_shifts(&persistence, &filter(Some(shop_b), None, false))
            .expect("list")
            .len(),
        1
    );
    assert_eq!(
        list_shifts(&persistence, &filter(None, Some(dana), false))
            .expect("list")
            .len(),
        1
    );
}
