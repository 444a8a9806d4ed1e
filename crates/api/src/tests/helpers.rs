// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use hunterboard_domain::{ContributorDraft, ImageAttachment, RoleDraft, Weapon};
use hunterboard_persistence::Persistence;

pub fn create_test_role_draft(name: &str) -> RoleDraft {
    RoleDraft {
        name: name.to_string(),
        gradient: String::from("from-amber-400 to-red-600"),
        border_color: String::from("border-amber-400"),
        icon: None,
        display_order: 0,
        active: true,
    }
}

pub fn create_test_contributor_draft(name: &str, role_id: Option<i64>, rank: i64) -> ContributorDraft {
    ContributorDraft {
        name: name.to_string(),
        role_id,
        description: None,
        rank,
        github_url: Some(format!("https://github.com/{}", name.to_lowercase())),
        discord_username: None,
        active: true,
        image: None,
    }
}

pub fn create_test_png(bytes: &[u8]) -> ImageAttachment {
    ImageAttachment::new(String::from("image/png"), bytes.to_vec())
}

fn create_test_weapon(weapon_id: i64, name: &str, element: Option<&str>) -> Weapon {
    Weapon {
        weapon_id,
        name: name.to_string(),
        image: format!("weapons/{weapon_id}.webp"),
        element: element.map(str::to_string),
        element_icon: element.map(|e| format!("elements/{}.webp", e.to_lowercase())),
    }
}

/// Weapons 1 through 10, cycling through four elements and none.
pub fn create_test_catalog() -> Vec<Weapon> {
    let elements = [Some("Dark"), Some("Fire"), Some("Water"), Some("Wind"), None];
    (1..=10)
        .map(|id| {
            let element = elements[usize::try_from(id % 5).unwrap()];
            create_test_weapon(id, &format!("Weapon {id:02}"), element)
        })
        .collect()
}

/// In-memory store with weapons 1 through 10 in the catalog.
pub fn create_test_persistence() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.import_weapons(&create_test_catalog()).unwrap();
    persistence
}

/// Creates a role through persistence and returns its id.
pub fn insert_role(persistence: &mut Persistence, name: &str) -> i64 {
    persistence.insert_role(&create_test_role_draft(name)).unwrap()
}
