// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side accessors. Every function takes a `&Connection` so it
//! works both standalone and inside an open transaction.

mod employees;
mod releases;
mod shifts;
mod shops;
mod time_off;
mod users;

pub use employees::{get_employee, list_employees};
pub use releases::{
    count_active_releases, find_active_release_for_shift, get_release, list_releases,
};
pub use shifts::{
    find_overlapping_shift, get_shift, list_shifts_in_range,
};
pub use shops::{get_shop, list_shops};
pub use time_off::{
    count_pending_time_off, find_blocking_time_off, find_overlapping_time_off, get_time_off,
    list_time_off, list_time_off_for_employee,
};
pub use users::{get_session_user, get_user_by_username};
