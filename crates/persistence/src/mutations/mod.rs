// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side accessors. Every function takes a `&Connection`, so
//! callers compose them inside one immediate transaction per
//! operation.

mod employees;
mod releases;
mod sessions;
mod shifts;
mod shops;
mod time_off;
mod users;

pub use employees::{insert_employee, update_employee};
pub use releases::{insert_release, update_release};
pub use sessions::{create_session, delete_session, purge_expired_sessions};
pub use shifts::{insert_shift, set_shift_owner, set_shift_status, update_shift};
pub use shops::{insert_shop, update_shop};
pub use time_off::{delete_time_off, insert_time_off, set_time_off_status};
pub use users::{insert_user, link_user_to_employee};
