// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! MariaDB/MySQL backend validation.
//!
//! Every test here is `#[ignore]`d and runs only through
//! `cargo xtask test-mariadb`, which provisions the database and sets
//! `DATABASE_URL` and `HUNTERBOARD_TEST_BACKEND=mariadb`. Missing
//! infrastructure is a hard failure, never a silent skip.
//!
//! These tests check schema-level behavior: migrations, foreign keys,
//! the role name UNIQUE index and its collation, and transaction rollback.
//! Business rules are covered by the `SQLite` suite.

use diesel::MysqlConnection;
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use hunterboard_domain::{TierPlacement, TierRank};
use std::env;

use super::{create_test_role_draft, create_test_weapon};
use crate::backend::mysql;
use crate::{Persistence, PersistenceError};

#[derive(QueryableByName)]
struct CountResult {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

fn get_mariadb_url() -> String {
    env::var("DATABASE_URL")
        .expect("DATABASE_URL not set - MariaDB tests must be run via `cargo xtask test-mariadb`")
}

fn verify_mariadb_test_environment() {
    let backend = env::var("HUNTERBOARD_TEST_BACKEND").expect(
        "HUNTERBOARD_TEST_BACKEND not set - MariaDB tests must be run via `cargo xtask test-mariadb`",
    );
    assert_eq!(backend, "mariadb", "HUNTERBOARD_TEST_BACKEND must be 'mariadb'");
}

fn reset_tables(conn: &mut MysqlConnection) {
    for table in ["tier_list_entries", "contributors", "roles", "weapons"] {
        diesel::sql_query(format!("DELETE FROM {table}"))
            .execute(conn)
            .expect("Failed to reset table");
    }
}

fn open_clean_persistence() -> Persistence {
    let mut persistence =
        Persistence::new_with_mysql(&get_mariadb_url()).expect("Failed to open MariaDB");
    let crate::BackendConnection::Mysql(conn) = &mut persistence.conn else {
        panic!("expected MySQL backend");
    };
    reset_tables(conn);
    persistence
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_migrations_apply_cleanly() {
    verify_mariadb_test_environment();

    let result = mysql::initialize_database(&get_mariadb_url());
    assert!(
        result.is_ok(),
        "Failed to initialize MariaDB and run migrations: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_foreign_key_enforcement() {
    verify_mariadb_test_environment();

    let mut conn = mysql::initialize_database(&get_mariadb_url())
        .expect("Failed to initialize MariaDB database");
    assert!(mysql::verify_foreign_key_enforcement(&mut conn).is_ok());

    let result = diesel::sql_query(
        "INSERT INTO tier_list_entries (weapon_id, tier_rank, tier_position) VALUES (99999, 'S', 0)",
    )
    .execute(&mut conn);
    assert!(result.is_err(), "Unknown weapon_id must be rejected");
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_role_name_unique_and_case_sensitive() {
    verify_mariadb_test_environment();
    let mut persistence = open_clean_persistence();

    persistence.insert_role(&create_test_role_draft("Developer")).unwrap();

    assert_eq!(
        persistence.insert_role(&create_test_role_draft("Developer")),
        Err(PersistenceError::DuplicateRoleName(String::from("Developer")))
    );
    assert!(persistence.insert_role(&create_test_role_draft("developer")).is_ok());
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_tier_list_replace_rolls_back() {
    verify_mariadb_test_environment();
    let mut persistence = open_clean_persistence();
    persistence
        .import_weapons(&[create_test_weapon(1, "Blade", None)])
        .unwrap();

    let keep = TierPlacement {
        weapon_id: 1,
        tier_rank: TierRank::A,
        position: 0,
    };
    persistence.replace_tier_list(&[keep]).unwrap();

    let bad = TierPlacement {
        weapon_id: 404,
        tier_rank: TierRank::S,
        position: 0,
    };
    assert!(persistence.replace_tier_list(&[bad]).is_err());

    let crate::BackendConnection::Mysql(conn) = &mut persistence.conn else {
        panic!("expected MySQL backend");
    };
    let count: i64 = diesel::sql_query("SELECT COUNT(*) AS count FROM tier_list_entries")
        .get_result::<CountResult>(conn)
        .map(|r| r.count)
        .expect("Failed to count entries");
    assert_eq!(count, 1, "Previous tier list must survive a failed save");
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_delete_role_nullifies() {
    verify_mariadb_test_environment();
    let mut persistence = open_clean_persistence();

    let role_id = persistence.insert_role(&create_test_role_draft("Developer")).unwrap();
    let contributor_id = persistence
        .insert_contributor(&super::create_test_contributor_draft("Ann", Some(role_id), 0))
        .unwrap();

    persistence.delete_role(role_id).unwrap();

    assert_eq!(persistence.get_contributor(contributor_id).unwrap().role_id, None);
}
