// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::date;

use rota_domain::{TimeOffRequest, TimeOffStatus, TimeOffType};

use super::helpers::{open, seed_employee};
use crate::mutations::{delete_time_off, insert_time_off, set_time_off_status};
use crate::queries::{
    count_pending_time_off, find_blocking_time_off, find_overlapping_time_off, get_time_off,
};
use crate::PersistenceError;

fn seed_request(conn: &rusqlite::Connection, employee_id: i64) -> i64 {
    let request = TimeOffRequest::new(
        employee_id,
        date!(2026 - 01 - 05),
        date!(2026 - 01 - 09),
        TimeOffType::Vacation,
        String::from("winter trip"),
    );
    insert_time_off(conn, &request).expect("insert should succeed")
}

#[test]
fn test_time_off_round_trip() {
    let db = open();
    let employee_id = seed_employee(db.connection(), "Dana");
    let id = seed_request(db.connection(), employee_id);

    let request = get_time_off(db.connection(), id).expect("request should exist");
    assert_eq!(request.kind, TimeOffType::Vacation);
    assert_eq!(request.status, TimeOffStatus::Pending);
    assert_eq!(request.date_from, date!(2026 - 01 - 05));
    assert_eq!(request.date_to, date!(2026 - 01 - 09));
}

#[test]
fn test_pending_requests_never_block() {
    let db = open();
    let employee_id = seed_employee(db.connection(), "Dana");
    seed_request(db.connection(), employee_id);

    let blocking = find_blocking_time_off(db.connection(), employee_id, date!(2026 - 01 - 07))
        .expect("lookup should succeed");
    assert!(blocking.is_none());
}

#[test]
fn test_approved_requests_block_inclusive_bounds() {
    let db = open();
    let employee_id = seed_employee(db.connection(), "Dana");
    let id = seed_request(db.connection(), employee_id);
    set_time_off_status(db.connection(), id, TimeOffStatus::Approved)
        .expect("status update should succeed");

    for date in [date!(2026 - 01 - 05), date!(2026 - 01 - 07), date!(2026 - 01 - 09)] {
        let blocking = find_blocking_time_off(db.connection(), employee_id, date)
            .expect("lookup should succeed");
        assert!(blocking.is_some(), "{date} should be blocked");
    }

    let outside = find_blocking_time_off(db.connection(), employee_id, date!(2026 - 01 - 10))
        .expect("lookup should succeed");
    assert!(outside.is_none());
}

#[test]
fn test_overlap_guard_sees_pending_but_not_rejected() {
    let db = open();
    let employee_id = seed_employee(db.connection(), "Dana");
    let id = seed_request(db.connection(), employee_id);

    let overlap = find_overlapping_time_off(
        db.connection(),
        employee_id,
        date!(2026 - 01 - 08),
        date!(2026 - 01 - 12),
        None,
    )
    .expect("lookup should succeed");
    assert!(overlap.is_some());

    set_time_off_status(db.connection(), id, TimeOffStatus::Rejected)
        .expect("status update should succeed");
    let overlap = find_overlapping_time_off(
        db.connection(),
        employee_id,
        date!(2026 - 01 - 08),
        date!(2026 - 01 - 12),
        None,
    )
    .expect("lookup should succeed");
    assert!(overlap.is_none());
}

#[test]
fn test_pending_count_tracks_decisions() {
    let db = open();
    let employee_id = seed_employee(db.connection(), "Dana");
    let id = seed_request(db.connection(), employee_id);

    assert_eq!(
        count_pending_time_off(db.connection()).expect("count should succeed"),
        1
    );

    set_time_off_status(db.connection(), id, TimeOffStatus::Approved)
        .expect("status update should succeed");
    assert_eq!(
        count_pending_time_off(db.connection()).expect("count should succeed"),
        0
    );
}

#[test]
fn test_withdrawing_removes_the_row() {
    let db = open();
    let employee_id = seed_employee(db.connection(), "Dana");
    let id = seed_request(db.connection(), employee_id);

    delete_time_off(db.connection(), id).expect("delete should succeed");
    assert!(matches!(
        get_time_off(db.connection(), id),
        Err(PersistenceError::NotFound(_))
    ));
    // A second delete reports not found.
    assert!(matches!(
        delete_time_off(db.connection(), id),
        Err(PersistenceError::NotFound(_))
    ));
}
