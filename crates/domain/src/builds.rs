// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static per-character build plans.
//!
//! The dataset is embedded at compile time and never mutated at runtime.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

const EMBEDDED_BUILDS: &str = include_str!("../data/builds.json");

/// One equipped artifact piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPiece {
    /// Equipment slot, e.g. `"Helmet"` or `"Necklace"`.
    pub slot: String,
    pub set: String,
    pub main_stat: String,
    #[serde(default)]
    pub sub_stats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorePiece {
    pub slot: String,
    pub name: String,
    pub main_stat: String,
}

/// A stat threshold the build aims for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTarget {
    pub stat: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBonus {
    pub set: String,
    pub pieces: u8,
    pub effect: String,
}

/// A named build variant (e.g. general purpose, boss fights).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildVariant {
    pub name: String,
    pub artifacts: Vec<ArtifactPiece>,
    #[serde(default)]
    pub cores: Vec<CorePiece>,
    #[serde(default)]
    pub stat_targets: Vec<StatTarget>,
    #[serde(default)]
    pub set_bonuses: Vec<SetBonus>,
}

/// The build plan of one hunter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChasseurBuild {
    pub character_id: String,
    pub character_name: String,
    pub element: Option<String>,
    pub variants: Vec<BuildVariant>,
}

/// Loads the embedded build dataset.
///
/// # Errors
///
/// Returns `DomainError::InvalidBuildData` if the embedded JSON does not
/// decode.
pub fn load_builds() -> Result<Vec<ChasseurBuild>, DomainError> {
    serde_json::from_str(EMBEDDED_BUILDS).map_err(|e| DomainError::InvalidBuildData(e.to_string()))
}

/// Finds one character's build plan by identifier.
///
/// # Errors
///
/// Returns an error if the embedded dataset does not decode.
pub fn find_build(character_id: &str) -> Result<Option<ChasseurBuild>, DomainError> {
    Ok(load_builds()?
        .into_iter()
        .find(|build| build.character_id == character_id))
}
