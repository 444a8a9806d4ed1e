// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weapon catalog reads and the tier list save/load workflow.
//!
//! The stored tier list is one global assignment. Saving replaces it
//! entirely; loading always yields all seven labels.

use hunterboard_domain::{
    TierAssignment, TierBuckets, TierPlacement, TierRank, Weapon, flatten_assignment,
};
use hunterboard_persistence::{Persistence, StoredTierEntry};
use tracing::{debug, info, warn};

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{
    ListWeaponsResponse, SaveTierListResponse, TierListExistsResponse, TierListResponse,
};

/// Lists the whole weapon catalog.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_weapons(persistence: &mut Persistence) -> Result<ListWeaponsResponse, ApiError> {
    let weapons: Vec<Weapon> = persistence
        .list_weapons()
        .map_err(|e| translate_persistence_error(e, "Failed to list weapons"))?;
    Ok(ListWeaponsResponse { weapons })
}

/// Lists the weapons of one element.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_weapons_by_element(
    persistence: &mut Persistence,
    element: &str,
) -> Result<ListWeaponsResponse, ApiError> {
    let weapons: Vec<Weapon> = persistence
        .list_weapons_by_element(element)
        .map_err(|e| translate_persistence_error(e, "Failed to list weapons"))?;
    Ok(ListWeaponsResponse { weapons })
}

/// Reads one weapon. An unknown id is `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_weapon(persistence: &mut Persistence, weapon_id: i64) -> Result<Option<Weapon>, ApiError> {
    persistence
        .get_weapon(weapon_id)
        .map_err(|e| translate_persistence_error(e, "Failed to load weapon"))
}

/// Replaces the stored tier list with `assignment`.
///
/// An empty assignment clears the list. A weapon may be placed in more
/// than one bucket. If any placement references an unknown weapon, the
/// previous list is kept.
///
/// # Errors
///
/// Returns an error if the replace fails.
pub fn save_tier_list(
    persistence: &mut Persistence,
    assignment: &TierAssignment,
) -> Result<SaveTierListResponse, ApiError> {
    let placements: Vec<TierPlacement> = flatten_assignment(assignment);

    let saved_entries: usize = persistence
        .replace_tier_list(&placements)
        .map_err(|e| translate_persistence_error(e, "Failed to save tier list"))?;

    info!(saved_entries, "Saved tier list");

    Ok(SaveTierListResponse {
        saved_entries,
        message: format!("Saved tier list with {saved_entries} entries"),
    })
}

/// Groups stored rows into buckets.
///
/// Rows must arrive in position order. Rows with an unknown label are
/// dropped.
#[must_use]
pub fn build_tier_buckets(rows: Vec<StoredTierEntry>) -> TierBuckets {
    let mut buckets: TierBuckets = TierBuckets::new();

    for row in rows {
        match row.tier_rank.parse::<TierRank>() {
            Ok(tier_rank) => buckets.push(tier_rank, row.weapon),
            Err(e) => {
                warn!(
                    entry_id = row.entry_id,
                    weapon_id = row.weapon.weapon_id,
                    error = %e,
                    "Dropping tier list row with unknown label"
                );
            }
        }
    }

    buckets
}

/// Loads the stored tier list.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_saved_tier_list(persistence: &mut Persistence) -> Result<TierListResponse, ApiError> {
    let rows: Vec<StoredTierEntry> = persistence
        .load_tier_list_rows()
        .map_err(|e| translate_persistence_error(e, "Failed to load tier list"))?;

    debug!(rows = rows.len(), "Loaded tier list rows");
    Ok(TierListResponse {
        tiers: build_tier_buckets(rows),
    })
}

/// Reports whether any tier list entry is stored.
///
/// A failing query is logged and reported as `false`.
#[must_use]
pub fn has_saved_tier_list(persistence: &mut Persistence) -> TierListExistsResponse {
    let exists: bool = match persistence.count_tier_list_entries() {
        Ok(count) => count > 0,
        Err(e) => {
            warn!(error = %e, "Tier list existence check failed");
            false
        }
    };
    TierListExistsResponse { exists }
}
