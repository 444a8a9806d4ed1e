// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use hunterboard_domain::{Role, Weapon};

use crate::diesel_schema::{contributors, roles, tier_list_entries, weapons};

/// Diesel Queryable struct for role rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = roles)]
pub(crate) struct RoleRow {
    pub role_id: i64,
    pub name: String,
    pub gradient: String,
    pub border_color: String,
    pub icon: Option<String>,
    pub display_order: i32,
    pub is_active: i32,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            role_id: row.role_id,
            name: row.name,
            gradient: row.gradient,
            border_color: row.border_color,
            icon: row.icon,
            display_order: row.display_order,
            active: row.is_active != 0,
        }
    }
}

/// Diesel Queryable struct for contributor rows.
///
/// The role display name is selected separately through a left join.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = contributors)]
pub(crate) struct ContributorRow {
    pub contributor_id: i64,
    pub name: String,
    pub role_id: Option<i64>,
    pub description: Option<String>,
    pub contributor_rank: i32,
    pub github_url: Option<String>,
    pub discord_username: Option<String>,
    pub is_active: i32,
    pub image: Option<String>,
}

/// Diesel Queryable struct for weapon rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = weapons)]
pub(crate) struct WeaponRow {
    pub weapon_id: i64,
    pub name: String,
    pub image: String,
    pub element: Option<String>,
    pub element_icon: Option<String>,
}

impl From<WeaponRow> for Weapon {
    fn from(row: WeaponRow) -> Self {
        Self {
            weapon_id: row.weapon_id,
            name: row.name,
            image: row.image,
            element: row.element,
            element_icon: row.element_icon,
        }
    }
}

/// Insertable weapon catalog row.
#[derive(Debug, Insertable)]
#[diesel(table_name = weapons)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewWeapon<'a> {
    pub weapon_id: i64,
    pub name: &'a str,
    pub image: &'a str,
    pub element: Option<&'a str>,
    pub element_icon: Option<&'a str>,
}

impl<'a> From<&'a Weapon> for NewWeapon<'a> {
    fn from(weapon: &'a Weapon) -> Self {
        Self {
            weapon_id: weapon.weapon_id,
            name: &weapon.name,
            image: &weapon.image,
            element: weapon.element.as_deref(),
            element_icon: weapon.element_icon.as_deref(),
        }
    }
}

/// Insertable tier list row. Rows are written in one batch per save.
#[derive(Debug, Insertable)]
#[diesel(table_name = tier_list_entries)]
pub(crate) struct NewTierListEntry {
    pub weapon_id: i64,
    pub tier_rank: &'static str,
    pub tier_position: i32,
}

/// A stored tier list row joined with its weapon.
///
/// `tier_rank` is the raw stored label. Rows written outside the
/// application may carry labels that do not parse; callers decide how to
/// treat them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTierEntry {
    pub entry_id: i64,
    pub tier_rank: String,
    pub position: i32,
    pub weapon: Weapon,
}
