// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod backend_validation_tests;
mod initialization_tests;
mod weapon_tests;

use hunterboard_domain::{ContributorDraft, RoleDraft, Weapon};

use crate::SqlitePersistence;

pub fn create_test_role_draft(name: &str) -> RoleDraft {
    RoleDraft {
        name: name.to_string(),
        gradient: String::from("from-purple-500 to-blue-500"),
        border_color: String::from("border-purple-400"),
        icon: None,
        display_order: 0,
        active: true,
    }
}

pub fn create_test_contributor_draft(name: &str, role_id: Option<i64>, rank: i64) -> ContributorDraft {
    ContributorDraft {
        name: name.to_string(),
        role_id,
        description: Some(format!("{name} helps out")),
        rank,
        github_url: None,
        discord_username: None,
        active: true,
        image: None,
    }
}

pub fn create_test_weapon(weapon_id: i64, name: &str, element: Option<&str>) -> Weapon {
    Weapon {
        weapon_id,
        name: name.to_string(),
        image: format!("weapons/{weapon_id}.webp"),
        element: element.map(str::to_string),
        element_icon: element.map(|e| format!("elements/{}.webp", e.to_lowercase())),
    }
}

/// Opens an in-memory database seeded with five weapons (ids 1 through 5).
pub fn create_seeded_persistence() -> SqlitePersistence {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let catalog = vec![
        create_test_weapon(1, "Demon King's Daggers", Some("Dark")),
        create_test_weapon(2, "Orb of Avarice", Some("Fire")),
        create_test_weapon(3, "Kasaka's Venom Fang", Some("Dark")),
        create_test_weapon(4, "Baruka's Dagger", Some("Wind")),
        create_test_weapon(5, "Knight Killer", None),
    ];
    persistence.import_weapons(&catalog).unwrap();
    persistence
}
