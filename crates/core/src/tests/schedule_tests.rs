// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the pre-write conflict gate.

use crate::{CoreError, check_schedule};
use rota_domain::{DomainError, find_overlap};

use super::helpers::{approved_time_off, shift_for, shift_on};
use time::macros::{date, time};

#[test]
fn test_clean_schedule_passes() {
    let result = check_schedule(time!(09:00), time!(17:00), None, None, false);
    assert!(result.is_ok());
}

#[test]
fn test_inverted_time_range_is_a_domain_violation() {
    let result = check_schedule(time!(17:00), time!(09:00), None, None, false);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidTimeRange { .. }
        ))
    ));
}

#[test]
fn test_overlap_blocks_the_write() {
    let existing = shift_for(7, 1);
    let result = check_schedule(time!(12:00), time!(18:00), Some(&existing), None, false);

    match result {
        Err(CoreError::ScheduleConflict { conflicting }) => {
            assert_eq!(conflicting.id, Some(1));
        }
        other => panic!("expected ScheduleConflict, got {other:?}"),
    }
}

#[test]
fn test_overlap_is_not_overridable_by_force() {
    let existing = shift_for(7, 1);
    let result = check_schedule(time!(12:00), time!(18:00), Some(&existing), None, true);

    assert!(matches!(result, Err(CoreError::ScheduleConflict { .. })));
}

#[test]
fn test_touching_shifts_produce_no_overlap() {
    // A 09:00-12:00 shift and a 12:00-15:00 candidate share an
    // endpoint, which is not a conflict under half-open intervals.
    let existing = vec![shift_on(
        7,
        1,
        date!(2026 - 01 - 05),
        time!(09:00),
        time!(12:00),
    )];
    let overlap = find_overlap(&existing, time!(12:00), time!(15:00), None);
    assert!(overlap.is_none());

    let result = check_schedule(time!(12:00), time!(15:00), overlap, None, false);
    assert!(result.is_ok());
}

#[test]
fn test_approved_time_off_blocks_without_force() {
    let blocking = approved_time_off(7, date!(2026 - 01 - 05), date!(2026 - 01 - 09));
    let result = check_schedule(time!(09:00), time!(17:00), None, Some(&blocking), false);

    match result {
        Err(CoreError::TimeOffConflict { blocking }) => {
            assert_eq!(blocking.employee_id, 7);
        }
        other => panic!("expected TimeOffConflict, got {other:?}"),
    }
}

#[test]
fn test_force_overrides_time_off_only() {
    let blocking = approved_time_off(7, date!(2026 - 01 - 05), date!(2026 - 01 - 09));
    let result = check_schedule(time!(09:00), time!(17:00), None, Some(&blocking), true);

    assert!(result.is_ok());
}
