// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A tier bucket label.
///
/// The variant order is the display order: `SSS` is the best bucket and `D`
/// the worst. Ordering comparisons follow this enumeration, never the
/// lexicographic order of the labels.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TierRank {
    SSS,
    SS,
    S,
    A,
    B,
    C,
    D,
}

impl TierRank {
    /// Every label, best first.
    pub const ALL: [Self; 7] = [
        Self::SSS,
        Self::SS,
        Self::S,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
    ];

    /// Converts this label to its stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SSS => "SSS",
            Self::SS => "SS",
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl FromStr for TierRank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SSS" => Ok(Self::SSS),
            "SS" => Ok(Self::SS),
            "S" => Ok(Self::S),
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            _ => Err(DomainError::UnknownTierRank(s.to_string())),
        }
    }
}

impl std::fmt::Display for TierRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three-way status filter applied to contributor listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Every contributor regardless of status.
    #[default]
    All,
    /// Only active contributors.
    Active,
    /// Only inactive contributors.
    Inactive,
}

impl StatusFilter {
    /// Returns whether a record with the given `active` flag passes the filter.
    #[must_use]
    pub const fn matches(&self, active: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => active,
            Self::Inactive => !active,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::UnknownStatusFilter(s.to_string())),
        }
    }
}

/// A reusable badge definition assignable to contributors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub role_id: i64,
    /// Unique among roles, compared exactly as stored.
    pub name: String,
    /// A pair of color stops, e.g. `"from-purple-500 to-blue-500"`.
    pub gradient: String,
    pub border_color: String,
    /// Optional short glyph shown beside the badge.
    pub icon: Option<String>,
    /// Display sort key, ascending.
    pub display_order: i32,
    pub active: bool,
}

/// Operator-entered role data for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RoleDraft {
    pub name: String,
    pub gradient: String,
    pub border_color: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// A person credited on the public site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub contributor_id: i64,
    pub name: String,
    /// `None` when no role is assigned or the role was deleted.
    pub role_id: Option<i64>,
    /// Display name of the referenced role, resolved at read time.
    pub role_name: Option<String>,
    pub description: Option<String>,
    /// Display order, ascending.
    pub rank: u32,
    pub github_url: Option<String>,
    pub discord_username: Option<String>,
    pub active: bool,
    /// Reference to a stored image asset.
    pub image: Option<String>,
}

/// Operator-entered contributor data for create and update.
///
/// `rank` is signed so that negative input can be reported as a field error
/// instead of failing to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContributorDraft {
    pub name: String,
    pub role_id: Option<i64>,
    pub description: Option<String>,
    #[serde(default)]
    pub rank: i64,
    pub github_url: Option<String>,
    pub discord_username: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Existing image reference, kept when no new attachment is supplied.
    pub image: Option<String>,
}

impl ContributorDraft {
    /// Builds a draft pre-filled from an existing contributor, as an edit form would.
    #[must_use]
    pub fn from_contributor(contributor: &Contributor) -> Self {
        Self {
            name: contributor.name.clone(),
            role_id: contributor.role_id,
            description: contributor.description.clone(),
            rank: i64::from(contributor.rank),
            github_url: contributor.github_url.clone(),
            discord_username: contributor.discord_username.clone(),
            active: contributor.active,
            image: contributor.image.clone(),
        }
    }
}

impl RoleDraft {
    /// Builds a draft pre-filled from an existing role.
    #[must_use]
    pub fn from_role(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            gradient: role.gradient.clone(),
            border_color: role.border_color.clone(),
            icon: role.icon.clone(),
            display_order: role.display_order,
            active: role.active,
        }
    }
}

/// A catalog weapon. Read-only from the admin backend's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub weapon_id: i64,
    pub name: String,
    pub image: String,
    pub element: Option<String>,
    /// Image reference for the element badge.
    pub element_icon: Option<String>,
}

const fn default_active() -> bool {
    true
}
