// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::{
    approve_time_off, cancel_time_off, create_time_off, list_time_off, reject_time_off,
};
use crate::tests::helpers::{manager, seed_employee, setup, staff, time_off_request};

#[test]
fn test_create_time_off_round_trip() {
    let mut persistence = setup();
    let employee_id = seed_employee(&persistence, "Dana");

    let response = create_time_off(
        &mut persistence,
        &staff(2, employee_id),
        &time_off_request(employee_id, "2026-02-02", "2026-02-06"),
    )
    .expect("time off created");

    assert_eq!(response.employee_id, employee_id);
    assert_eq!(response.status, "pending");
    assert_eq!(response.kind, "vacation");
    assert_eq!(response.date_from, "2026-02-02");
    assert_eq!(response.date_to, "2026-02-06");
}

#[test]
fn test_staff_cannot_request_time_off_for_others() {
    let mut persistence = setup();
    let dana = seed_employee(&persistence, "Dana");
    let eli = seed_employee(&persistence, "Eli");

    let err = create_time_off(
        &mut persistence,
        &staff(2, dana),
        &time_off_request(eli, "2026-02-02", "2026-02-06"),
    )
    .expect_err("acting for another employee rejected");
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_backwards_date_range_is_invalid_input() {
    let mut persistence = setup();
    let employee_id = seed_employee(&persistence, "Dana");

    let err = create_time_off(
        &mut persistence,
        &manager(),
        &time_off_request(employee_id, "2026-02-06", "2026-02-02"),
    )
    .expect_err("backwards range rejected");
    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_overlapping_request_is_a_duplicate_even_while_pending() {
    let mut persistence = setup();
    let employee_id = seed_employee(&persistence, "Dana");

    create_time_off(
        &mut persistence,
        &manager(),
        &time_off_request(employee_id, "2026-02-02", "2026-02-06"),
    )
    .expect("first request succeeds");

    let err = create_time_off(
        &mut persistence,
        &manager(),
        &time_off_request(employee_id, "2026-02-06", "2026-02-10"),
    )
    .expect_err("overlapping range rejected");
    assert!(matches!(err, ApiError::DuplicateTimeOff { .. }));
}

#[test]
fn test_rejected_request_no_longer_blocks_a_new_one() {
    let mut persistence = setup();
    let employee_id = seed_employee(&persistence, "Dana");

    let first = create_time_off(
        &mut persistence,
        &manager(),
        &time_off_request(employee_id, "2026-02-02", "2026-02-06"),
    )
    .expect("first request succeeds");
    reject_time_off(&mut persistence, &manager(), first.id).expect("rejected");

    create_time_off(
        &mut persistence,
        &manager(),
        &time_off_request(employee_id, "2026-02-02", "2026-02-06"),
    )
    .expect("same range allowed after rejection");
}

#[test]
fn test_other_employees_ranges_do_not_collide() {
    let mut persistence = setup();
    let dana = seed_employee(&persistence, "Dana");
    let eli = seed_employee(&persistence, "Eli");

    create_time_off(
        &mut persistence,
        &manager(),
        &time_off_request(dana, "2026-02-02", "2026-02-06"),
    )
    .expect("dana's request succeeds");
    create_time_off(
        &mut persistence,
        &manager(),
        &time_off_request(eli, "2026-02-02", "2026-02-06"),
    )
    .expect("the same range for eli is fine");
}

#[test]
fn test_decisions_are_manager_only_and_single_shot() {
    let mut persistence = setup();
    let employee_id = seed_employee(&persistence, "Dana");

    let request = create_time_off(
        &mut persistence,
        &staff(2, employee_id),
        &time_off_request(employee_id, "2026-02-02", "2026-02-06"),
    )
    .expect("request created");

    let err = approve_time_off(&mut persistence, &staff(2, employee_id), request.id)
        .expect_err("staff cannot approve");
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let approved = approve_time_off(&mut persistence, &manager(), request.id)
        .expect("manager approves");
    assert_eq!(approved.status, "approved");

    let err = reject_time_off(&mut persistence, &manager(), request.id)
        .expect_err("already decided");
    assert!(matches!(err, ApiError::InvalidState { .. }));
}

#[test]
fn test_withdrawing_a_pending_request_deletes_it() {
    let mut persistence = setup();
    let employee_id = seed_employee(&persistence, "Dana");

    let request = create_time_off(
        &mut persistence,
        &staff(2, employee_id),
        &time_off_request(employee_id, "2026-02-02", "2026-02-06"),
    )
    .expect("request created");

    cancel_time_off(&mut persistence, &staff(2, employee_id), request.id)
        .expect("requester withdraws");
    assert!(
        list_time_off(&persistence, Some(employee_id), None)
            .expect("list")
            .is_empty()
    );
}

#[test]
fn test_withdrawing_a_decided_request_fails() {
    let mut persistence = setup();
    let employee_id = seed_employee(&persistence, "Dana");

    let request = create_time_off(
        &mut persistence,
        &staff(2, employee_id),
        &time_off_request(employee_id, "2026-02-02", "2026-02-06"),
    )
    .expect("request created");
    approve_time_off(&mut persistence, &manager(), request.id).expect("approved");

    let err = cancel_time_off(&mut persistence, &staff(2, employee_id), request.id)
        .expect_err("decided request cannot be withdrawn");
    assert!(matches!(err, ApiError::InvalidState { .. }));
}

#[test]
fn test_withdrawal_is_guarded_by_ownership() {
    let mut persistence = setup();
    let dana = seed_employee(&persistence, "Dana");
    let eli = seed_employee(&persistence, "Eli");

    let request = create_time_off(
        &mut persistence,
        &staff(2, dana),
        &time_off_request(dana, "2026-02-02", "2026-02-06"),
    )
    .expect("request created");

    let err = cancel_time_off(&mut persistence, &staff(3, eli), request.id)
        .expect_err("another employee cannot withdraw it");
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    cancel_time_off(&mut persistence, &manager(), request.id).expect("a manager can");
}

#[test]
fn test_list_time_off_filters_by_employee_and_status() {
    let mut persistence = setup();
    let dana = seed_employee(&persistence, "Dana");
    let eli = seed_employee(&persistence, "Eli");

    let first = create_time_off(
        &mut persistence,
        &manager(),
        &time_off_request(dana, "2026-02-02", "2026-02-06"),
    )
    .expect("request created");
    create_time_off(
        &mut persistence,
        &manager(),
        &time_off_request(eli, "2026-03-02", "2026-03-06"),
    )
    .expect("request created");
    approve_time_off(&mut persistence, &manager(), first.id).expect("approved");

    assert_eq!(
        list_time_off(&persistence, None, None).expect("list").len(),
        2
    );
    assert_eq!(
        list_time_off(&persistence, Some(dana), None)
            .expect("list")
            .len(),
        1
    );
    assert_eq!(
        list_time_off(&persistence, None, Some("approved"))
            .expect("list")
            .len(),
        1
    );
    assert!(
        list_time_off(&persistence, Some(eli), Some("approved"))
            .expect("list")
            .is_empty()
    );
}
