// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Half-open interval overlap primitives for shift conflict detection.

use crate::types::{Shift, ShiftStatus};
use time::Time;

/// Tests whether two `[start, end)` intervals overlap.
///
/// Touching endpoints do not conflict: a shift ending at 12:00 and a
/// shift starting at 12:00 can belong to the same employee.
#[must_use]
pub fn intervals_overlap(a_start: Time, a_end: Time, b_start: Time, b_end: Time) -> bool {
    a_start < b_end && a_end > b_start
}

/// Returns the whole minutes between two times on the same day.
#[must_use]
pub fn minutes_between(start: Time, end: Time) -> i64 {
    (end - start).whole_minutes()
}

/// Finds the first shift in `shifts` whose interval overlaps
/// `[start, end)`.
///
/// Cancelled shifts never conflict. `exclude_shift_id` omits the
/// shift being edited from its own overlap check. Callers are
/// expected to have already restricted `shifts` to one employee and
/// one date.
#[must_use]
pub fn find_overlap(
    shifts: &[Shift],
    start: Time,
    end: Time,
    exclude_shift_id: Option<i64>,
) -> Option<&Shift> {
    shifts.iter().find(|existing| {
        if existing.status == ShiftStatus::Cancelled {
            return false;
        }
        if exclude_shift_id.is_some() && existing.id == exclude_shift_id {
            return false;
        }
        intervals_overlap(existing.start, existing.end, start, end)
    })
}
