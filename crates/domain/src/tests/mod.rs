// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod builds;
mod filter;

use crate::{Contributor, Role, Weapon};

pub fn create_test_role(role_id: i64, name: &str, display_order: i32) -> Role {
    Role {
        role_id,
        name: name.to_string(),
        gradient: String::from("from-purple-500 to-blue-500"),
        border_color: String::from("border-purple-400"),
        icon: None,
        display_order,
        active: true,
    }
}

pub fn create_test_contributor(
    contributor_id: i64,
    name: &str,
    role: Option<&Role>,
    rank: u32,
    active: bool,
) -> Contributor {
    Contributor {
        contributor_id,
        name: name.to_string(),
        role_id: role.map(|r| r.role_id),
        role_name: role.map(|r| r.name.clone()),
        description: None,
        rank,
        github_url: None,
        discord_username: None,
        active,
        image: None,
    }
}

pub fn create_test_weapon(weapon_id: i64, name: &str) -> Weapon {
    Weapon {
        weapon_id,
        name: name.to_string(),
        image: format!("weapons/{weapon_id}.webp"),
        element: Some(String::from("Fire")),
        element_icon: None,
    }
}
