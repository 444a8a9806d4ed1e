// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test opens an in-memory database, so migrations
//! and connection setup are exercised throughout. These cover the pieces
//! that are not: isolation, file databases and the foreign key check.

use super::create_test_role_draft;
use crate::SqlitePersistence;

#[test]
fn test_persistence_initialization() {
    let result = SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = SqlitePersistence::new_in_memory().unwrap();
    let mut db2 = SqlitePersistence::new_in_memory().unwrap();

    db1.insert_role(&create_test_role_draft("Developer")).unwrap();

    assert_eq!(db1.list_roles().unwrap().len(), 1);
    assert!(db2.list_roles().unwrap().is_empty(), "db2 must not see db1 rows");
}

#[test]
fn test_migrations_create_every_table() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    assert!(persistence.list_contributors().unwrap().is_empty());
    assert!(persistence.list_roles().unwrap().is_empty());
    assert!(persistence.list_weapons().unwrap().is_empty());
    assert_eq!(persistence.count_tier_list_entries().unwrap(), 0);
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_file_database_persists_across_reopen() {
    let path = std::env::temp_dir().join(format!(
        "hunterboard_init_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence = SqlitePersistence::new_with_file(&path).unwrap();
        persistence
            .insert_role(&create_test_role_draft("Translator"))
            .unwrap();
    }

    let mut reopened = SqlitePersistence::new_with_file(&path).unwrap();
    let roles = reopened.list_roles().unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].name, "Translator");

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
