// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The conflict gate run before every shift write.

use crate::error::CoreError;
use rota_domain::{validate_time_range, Shift, TimeOffRequest};
use time::Time;

/// Validates a candidate shift interval against the already-loaded
/// conflict state.
///
/// The caller loads `overlap` (the first same-employee, same-date,
/// non-cancelled shift whose interval intersects the candidate,
/// excluding the shift being edited) and `blocking_time_off` (an
/// approved request covering the date) and passes them in; this
/// function only decides.
///
/// `force` overrides the time-off block only. A hard schedule overlap
/// is never overridable.
///
/// # Errors
///
/// - `CoreError::DomainViolation` if `start >= end`.
/// - `CoreError::ScheduleConflict` if `overlap` is present.
/// - `CoreError::TimeOffConflict` if `blocking_time_off` is present
///   and `force` is false.
pub fn check_schedule(
    start: Time,
    end: Time,
    overlap: Option<&Shift>,
    blocking_time_off: Option<&TimeOffRequest>,
    force: bool,
) -> Result<(), CoreError> {
    validate_time_range(start, end)?;

    if let Some(conflicting) = overlap {
        return Err(CoreError::ScheduleConflict {
            conflicting: conflicting.clone(),
        });
    }

    if let Some(blocking) = blocking_time_off {
        if !force {
            return Err(CoreError::TimeOffConflict {
                blocking: blocking.clone(),
            });
        }
    }

    Ok(())
}
