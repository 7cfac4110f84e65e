// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, params};
use rota_domain::Shop;

use crate::error::PersistenceError;
use crate::rows::shop_from_parts;

/// Lists shops, active ones first by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_shops(conn: &Connection, include_inactive: bool) -> Result<Vec<Shop>, PersistenceError> {
    let sql = if include_inactive {
        "SELECT shop_id, name, color, is_active FROM shops ORDER BY is_active DESC, name"
    } else {
        "SELECT shop_id, name, color, is_active FROM shops WHERE is_active = 1 ORDER BY name"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    })?;

    let mut shops: Vec<Shop> = Vec::new();
    for row in rows {
        shops.push(shop_from_parts(row?));
    }
    Ok(shops)
}

/// Retrieves a shop by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the shop does not exist.
pub fn get_shop(conn: &Connection, shop_id: i64) -> Result<Shop, PersistenceError> {
    let parts = conn
        .query_row(
            "SELECT shop_id, name, color, is_active FROM shops WHERE shop_id = ?1",
            params![shop_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                PersistenceError::NotFound(format!("Shop {shop_id} not found"))
            }
            other => other.into(),
        })?;

    Ok(shop_from_parts(parts))
}
