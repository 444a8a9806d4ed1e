// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tier list assignment and bucket reconstruction.
//!
//! A saved tier list is a single global partition of weapons into the seven
//! [`TierRank`] buckets. Saving flattens an assignment into placements
//! (`weapon_id`, label, zero-based position); loading groups stored rows back
//! into buckets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{TierRank, Weapon};

/// A caller-supplied assignment: label to ordered weapon identifiers.
///
/// Labels may be missing or map to empty sequences. The same weapon id may
/// appear under several labels; exclusivity is not enforced.
pub type TierAssignment = BTreeMap<TierRank, Vec<i64>>;

/// One weapon placed in one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPlacement {
    pub weapon_id: i64,
    pub tier_rank: TierRank,
    /// Zero-based index within the bucket.
    pub position: u32,
}

/// Flattens an assignment into placements, preserving sequence order.
///
/// Placements are emitted bucket by bucket in label order.
#[must_use]
pub fn flatten_assignment(assignment: &TierAssignment) -> Vec<TierPlacement> {
    assignment
        .iter()
        .flat_map(|(tier_rank, weapon_ids)| {
            weapon_ids
                .iter()
                .zip(0_u32..)
                .map(move |(weapon_id, position)| TierPlacement {
                    weapon_id: *weapon_id,
                    tier_rank: *tier_rank,
                    position,
                })
        })
        .collect()
}

/// A loaded tier list: every label maps to its resolved weapons in order.
///
/// All seven labels are always present, even when the store is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierBuckets {
    buckets: BTreeMap<TierRank, Vec<Weapon>>,
}

impl Default for TierBuckets {
    fn default() -> Self {
        Self::new()
    }
}

impl TierBuckets {
    /// Creates a tier list with all seven labels mapped to empty buckets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: TierRank::ALL
                .iter()
                .map(|rank| (*rank, Vec::new()))
                .collect(),
        }
    }

    /// Appends a weapon to the end of a bucket.
    pub fn push(&mut self, tier_rank: TierRank, weapon: Weapon) {
        self.buckets.entry(tier_rank).or_default().push(weapon);
    }

    /// Returns the weapons of one bucket in order.
    #[must_use]
    pub fn bucket(&self, tier_rank: TierRank) -> &[Weapon] {
        self.buckets
            .get(&tier_rank)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the weapon identifiers of one bucket in order.
    #[must_use]
    pub fn weapon_ids(&self, tier_rank: TierRank) -> Vec<i64> {
        self.bucket(tier_rank)
            .iter()
            .map(|weapon| weapon.weapon_id)
            .collect()
    }

    /// Returns whether every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Converts the loaded buckets back into an assignment of identifiers.
    ///
    /// Empty buckets are kept so the result always carries all seven labels.
    #[must_use]
    pub fn to_assignment(&self) -> TierAssignment {
        self.buckets
            .iter()
            .map(|(rank, weapons)| (*rank, weapons.iter().map(|w| w.weapon_id).collect()))
            .collect()
    }

    /// Iterates over labels and their buckets, best label first.
    pub fn iter(&self) -> impl Iterator<Item = (&TierRank, &Vec<Weapon>)> {
        self.buckets.iter()
    }
}
