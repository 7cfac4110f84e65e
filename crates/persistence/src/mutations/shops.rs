// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, params};
use rota_domain::Shop;

use crate::error::PersistenceError;

/// Inserts a shop and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate name).
pub fn insert_shop(conn: &Connection, shop: &Shop) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO shops (name, color, is_active) VALUES (?1, ?2, ?3)",
        params![shop.name, shop.color, i64::from(shop.active)],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Updates a shop record in place.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the shop does not exist.
pub fn update_shop(conn: &Connection, shop_id: i64, shop: &Shop) -> Result<(), PersistenceError> {
    let changed = conn.execute(
        "UPDATE shops SET name = ?1, color = ?2, is_active = ?3 WHERE shop_id = ?4",
        params![shop.name, shop.color, i64::from(shop.active), shop_id],
    )?;

    if changed == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Shop {shop_id} not found"
        )));
    }
    Ok(())
}
