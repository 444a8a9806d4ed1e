// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tier list reads.
//!
//! Rows come back with their raw `tier_rank` text. Grouping into buckets
//! and label ordering happen above this layer.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use hunterboard_domain::Weapon;
use tracing::debug;

use crate::data_models::{StoredTierEntry, WeaponRow};
use crate::diesel_schema::{tier_list_entries, weapons};
use crate::error::PersistenceError;

backend_fn! {
/// Loads every tier list entry joined with its weapon.
///
/// Rows are ordered by position, then by insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_tier_list_rows(conn: &mut _) -> Result<Vec<StoredTierEntry>, PersistenceError> {
    let rows: Vec<(i64, String, i32, WeaponRow)> = tier_list_entries::table
        .inner_join(weapons::table)
        .select((
            tier_list_entries::entry_id,
            tier_list_entries::tier_rank,
            tier_list_entries::tier_position,
            WeaponRow::as_select(),
        ))
        .order((
            tier_list_entries::tier_position.asc(),
            tier_list_entries::entry_id.asc(),
        ))
        .load(conn)?;

    debug!(count = rows.len(), "Loaded tier list rows");

    Ok(rows
        .into_iter()
        .map(|(entry_id, tier_rank, position, weapon)| StoredTierEntry {
            entry_id,
            tier_rank,
            position,
            weapon: Weapon::from(weapon),
        })
        .collect())
}
}

backend_fn! {
/// Counts tier list entries.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_tier_list_entries(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(tier_list_entries::table.count().get_result(conn)?)
}
}
