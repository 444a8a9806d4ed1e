// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tier list replacement.
//!
//! The table holds exactly one tier list, so saving replaces it whole:
//! `clear_tier_list` then `insert_tier_list_entries`, inside one
//! transaction. A failing insert rolls the clear back.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use hunterboard_domain::TierPlacement;
use num_traits::ToPrimitive;
use tracing::{debug, info};

use crate::data_models::NewTierListEntry;
use crate::diesel_schema::tier_list_entries;
use crate::error::PersistenceError;

fn to_rows(placements: &[TierPlacement]) -> Result<Vec<NewTierListEntry>, PersistenceError> {
    placements
        .iter()
        .map(|placement| {
            let tier_position: i32 = placement.position.to_i32().ok_or_else(|| {
                PersistenceError::ValueOutOfRange(format!("tier position {}", placement.position))
            })?;
            Ok(NewTierListEntry {
                weapon_id: placement.weapon_id,
                tier_rank: placement.tier_rank.as_str(),
                tier_position,
            })
        })
        .collect()
}

backend_fn! {
/// Deletes every tier list entry. Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn clear_tier_list(conn: &mut _) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(tier_list_entries::table).execute(conn)?;
    debug!(removed, "Cleared tier list");
    Ok(removed)
}
}

backend_fn! {
/// Inserts placements in a single batch statement.
///
/// An empty slice issues no statement.
///
/// # Errors
///
/// Returns an error if a placement references an unknown weapon or the
/// insert fails.
pub fn insert_tier_list_entries(
    conn: &mut _,
    placements: &[TierPlacement],
) -> Result<usize, PersistenceError> {
    if placements.is_empty() {
        return Ok(0);
    }

    let rows: Vec<NewTierListEntry> = to_rows(placements)?;
    let inserted: usize = diesel::insert_into(tier_list_entries::table)
        .values(&rows)
        .execute(conn)?;
    debug!(inserted, "Inserted tier list entries");
    Ok(inserted)
}
}

/// Replaces the stored tier list with `placements` (`SQLite`).
///
/// # Errors
///
/// Returns an error if either phase fails; the previous list is kept.
pub fn replace_tier_list_sqlite(
    conn: &mut SqliteConnection,
    placements: &[TierPlacement],
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let removed: usize = clear_tier_list_sqlite(conn)?;
        let inserted: usize = insert_tier_list_entries_sqlite(conn, placements)?;
        info!(removed, inserted, "Replaced tier list");
        Ok(inserted)
    })
}

/// Replaces the stored tier list with `placements` (`MySQL`).
///
/// # Errors
///
/// Returns an error if either phase fails; the previous list is kept.
pub fn replace_tier_list_mysql(
    conn: &mut MysqlConnection,
    placements: &[TierPlacement],
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let removed: usize = clear_tier_list_mysql(conn)?;
        let inserted: usize = insert_tier_list_entries_mysql(conn, placements)?;
        info!(removed, inserted, "Replaced tier list");
        Ok(inserted)
    })
}
