// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_seeded_persistence, create_test_weapon};

#[test]
fn test_list_weapons_sorted_by_name() {
    let mut persistence = create_seeded_persistence();
    let names: Vec<String> = persistence
        .list_weapons()
        .unwrap()
        .into_iter()
        .map(|w| w.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "Baruka's Dagger",
            "Demon King's Daggers",
            "Kasaka's Venom Fang",
            "Knight Killer",
            "Orb of Avarice",
        ]
    );
}

#[test]
fn test_list_weapons_by_element() {
    let mut persistence = create_seeded_persistence();
    let ids: Vec<i64> = persistence
        .list_weapons_by_element("Dark")
        .unwrap()
        .into_iter()
        .map(|w| w.weapon_id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(persistence.list_weapons_by_element("Water").unwrap().is_empty());
}

#[test]
fn test_get_weapon() {
    let mut persistence = create_seeded_persistence();

    let weapon = persistence.get_weapon(2).unwrap().unwrap();
    assert_eq!(weapon.name, "Orb of Avarice");
    assert_eq!(weapon.element.as_deref(), Some("Fire"));
    assert_eq!(weapon.element_icon.as_deref(), Some("elements/fire.webp"));

    let elementless = persistence.get_weapon(5).unwrap().unwrap();
    assert_eq!(elementless.element, None);
}

#[test]
fn test_get_missing_weapon_is_none() {
    let mut persistence = create_seeded_persistence();
    assert_eq!(persistence.get_weapon(999).unwrap(), None);
}

#[test]
fn test_import_weapons_skips_existing_ids() {
    let mut persistence = create_seeded_persistence();

    let inserted = persistence
        .import_weapons(&[
            create_test_weapon(1, "Renamed", Some("Light")),
            create_test_weapon(6, "Gold-tone Staff", Some("Light")),
        ])
        .unwrap();

    assert_eq!(inserted, 1);
    assert_eq!(persistence.list_weapons().unwrap().len(), 6);
    assert_eq!(
        persistence.get_weapon(1).unwrap().unwrap().name,
        "Demon King's Daggers"
    );
}
