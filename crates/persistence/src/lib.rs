// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Hunterboard.
//!
//! Stores contributors, roles, the weapon catalog and the global tier list
//! through Diesel.
//!
//! ## Database Backend Support
//!
//! - **`SQLite`** (default): development, unit tests, single-host deployments
//! - **`MariaDB`/`MySQL`**: compiled in, validated through opt-in tests
//!
//! To run the `MySQL` validation tests:
//! ```bash
//! cargo xtask test-mariadb
//! ```
//!
//! ### Migration Strategy
//!
//! Each backend has its own migration directory:
//!
//! - `migrations/`: `SQLite` syntax (default)
//! - `migrations_mysql/`: `MySQL`/`MariaDB` syntax
//!
//! Both must describe the same schema. `cargo xtask verify-migrations`
//! compares them.
//!
//! ## Testing
//!
//! - `cargo test` runs against uniquely named in-memory `SQLite` databases
//! - `MariaDB` tests are `#[ignore]`d and never run implicitly

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::{MysqlConnection, SqliteConnection};
use hunterboard_domain::{Contributor, ContributorDraft, Role, RoleDraft, TierPlacement, Weapon};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique in-memory database names.
///
/// Each `new_in_memory()` call gets its own shared-cache database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates monomorphic backend-specific query/mutation functions.
///
/// From one body this emits `<name>_sqlite` taking `&mut SqliteConnection`
/// and `<name>_mysql` taking `&mut MysqlConnection`. Diesel needs a concrete
/// backend type at compile time, so generic functions over connections are
/// not an option.
///
/// The macro only duplicates bodies and substitutes connection types.
/// Dispatch happens in the `Persistence` adapter.
///
/// ```ignore
/// backend_fn! {
///     pub fn count_roles(conn: &mut _) -> Result<i64, PersistenceError> {
///         Ok(diesel_schema::roles::table.count().get_result(conn)?)
///     }
/// }
/// ```
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::StoredTierEntry;
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Alias used by callers that only ever run on `SQLite`.
pub type SqlitePersistence = Persistence;

/// The connection behind a `Persistence` adapter.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Mysql(MysqlConnection),
}

/// Persistence adapter over a single Diesel connection.
///
/// The backend is chosen at construction time and is invisible to callers.
/// The adapter is synchronous; the server serializes access behind a mutex.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    /// Opens a fresh in-memory `SQLite` database.
    ///
    /// Every call gets its own shared-cache database, so tests never see each
    /// other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:hunterboard_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Opens (or creates) a file-based `SQLite` database in WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Connects to a `MySQL`/`MariaDB` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or migrated.
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: MysqlConnection = backend::mysql::initialize_database(database_url)?;
        backend::mysql::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Mysql(conn),
        })
    }

    /// Startup check that referential integrity is enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => conn.verify_foreign_key_enforcement(),
            BackendConnection::Mysql(conn) => conn.verify_foreign_key_enforcement(),
        }
    }

    // ========================================================================
    // Contributors
    // ========================================================================

    /// Lists every contributor with its role name, ordered by rank.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_contributors(&mut self) -> Result<Vec<Contributor>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::contributors::list_contributors_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::contributors::list_contributors_mysql(conn),
        }
    }

    /// Retrieves one contributor.
    ///
    /// # Errors
    ///
    /// Returns `ContributorNotFound` if the id is unknown.
    pub fn get_contributor(&mut self, contributor_id: i64) -> Result<Contributor, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::contributors::get_contributor_sqlite(conn, contributor_id)
            }
            BackendConnection::Mysql(conn) => {
                queries::contributors::get_contributor_mysql(conn, contributor_id)
            }
        }
    }

    /// Inserts a contributor and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_contributor(&mut self, draft: &ContributorDraft) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::contributors::insert_contributor_sqlite(conn, draft)
            }
            BackendConnection::Mysql(conn) => {
                mutations::contributors::insert_contributor_mysql(conn, draft)
            }
        }
    }

    /// Overwrites a contributor.
    ///
    /// # Errors
    ///
    /// Returns `ContributorNotFound` if the id is unknown.
    pub fn update_contributor(
        &mut self,
        contributor_id: i64,
        draft: &ContributorDraft,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::contributors::update_contributor_sqlite(conn, contributor_id, draft)
            }
            BackendConnection::Mysql(conn) => {
                mutations::contributors::update_contributor_mysql(conn, contributor_id, draft)
            }
        }
    }

    /// Hard-deletes a contributor.
    ///
    /// # Errors
    ///
    /// Returns `ContributorNotFound` if the id is unknown.
    pub fn delete_contributor(&mut self, contributor_id: i64) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::contributors::delete_contributor_sqlite(conn, contributor_id)
            }
            BackendConnection::Mysql(conn) => {
                mutations::contributors::delete_contributor_mysql(conn, contributor_id)
            }
        }
    }

    /// Sets a contributor's active flag.
    ///
    /// # Errors
    ///
    /// Returns `ContributorNotFound` if the id is unknown.
    pub fn set_contributor_active(
        &mut self,
        contributor_id: i64,
        active: bool,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::contributors::set_contributor_active_sqlite(conn, contributor_id, active)
            }
            BackendConnection::Mysql(conn) => {
                mutations::contributors::set_contributor_active_mysql(conn, contributor_id, active)
            }
        }
    }

    /// Clears `role_id` on every contributor referencing `role_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn nullify_contributor_role(&mut self, role_id: i64) -> Result<usize, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::contributors::nullify_contributor_role_sqlite(conn, role_id)
            }
            BackendConnection::Mysql(conn) => {
                mutations::contributors::nullify_contributor_role_mysql(conn, role_id)
            }
        }
    }

    // ========================================================================
    // Roles
    // ========================================================================

    /// Lists every role in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_roles(&mut self) -> Result<Vec<Role>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::roles::list_roles_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::roles::list_roles_mysql(conn),
        }
    }

    /// Retrieves one role.
    ///
    /// # Errors
    ///
    /// Returns `RoleNotFound` if the id is unknown.
    pub fn get_role(&mut self, role_id: i64) -> Result<Role, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::roles::get_role_sqlite(conn, role_id),
            BackendConnection::Mysql(conn) => queries::roles::get_role_mysql(conn, role_id),
        }
    }

    /// Inserts a role and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRoleName` if the name is taken.
    pub fn insert_role(&mut self, draft: &RoleDraft) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::roles::insert_role_sqlite(conn, draft),
            BackendConnection::Mysql(conn) => mutations::roles::insert_role_mysql(conn, draft),
        }
    }

    /// Overwrites a role.
    ///
    /// # Errors
    ///
    /// Returns `RoleNotFound` if the id is unknown, or `DuplicateRoleName` if
    /// another role has the name.
    pub fn update_role(&mut self, role_id: i64, draft: &RoleDraft) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::roles::update_role_sqlite(conn, role_id, draft)
            }
            BackendConnection::Mysql(conn) => mutations::roles::update_role_mysql(conn, role_id, draft),
        }
    }

    /// Deletes a role, first clearing it from every contributor.
    ///
    /// Both steps run in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RoleNotFound` if the id is unknown.
    pub fn delete_role(&mut self, role_id: i64) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::roles::delete_role_sqlite(conn, role_id),
            BackendConnection::Mysql(conn) => mutations::roles::delete_role_mysql(conn, role_id),
        }
    }

    /// Sets a role's active flag.
    ///
    /// # Errors
    ///
    /// Returns `RoleNotFound` if the id is unknown.
    pub fn set_role_active(&mut self, role_id: i64, active: bool) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::roles::set_role_active_sqlite(conn, role_id, active)
            }
            BackendConnection::Mysql(conn) => {
                mutations::roles::set_role_active_mysql(conn, role_id, active)
            }
        }
    }

    /// Checks whether a role name is taken, optionally ignoring one role.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn role_name_exists(
        &mut self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::roles::role_name_exists_sqlite(conn, name, exclude_id)
            }
            BackendConnection::Mysql(conn) => {
                queries::roles::role_name_exists_mysql(conn, name, exclude_id)
            }
        }
    }

    // ========================================================================
    // Weapons
    // ========================================================================

    /// Lists the weapon catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_weapons(&mut self) -> Result<Vec<Weapon>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::weapons::list_weapons_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::weapons::list_weapons_mysql(conn),
        }
    }

    /// Lists the weapons of one element.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_weapons_by_element(&mut self, element: &str) -> Result<Vec<Weapon>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::weapons::list_weapons_by_element_sqlite(conn, element)
            }
            BackendConnection::Mysql(conn) => {
                queries::weapons::list_weapons_by_element_mysql(conn, element)
            }
        }
    }

    /// Retrieves one weapon, `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_weapon(&mut self, weapon_id: i64) -> Result<Option<Weapon>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::weapons::get_weapon_sqlite(conn, weapon_id),
            BackendConnection::Mysql(conn) => queries::weapons::get_weapon_mysql(conn, weapon_id),
        }
    }

    /// Imports catalog weapons, skipping ids already stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the import fails.
    pub fn import_weapons(&mut self, catalog: &[Weapon]) -> Result<usize, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::weapons::import_weapons_sqlite(conn, catalog),
            BackendConnection::Mysql(conn) => mutations::weapons::import_weapons_mysql(conn, catalog),
        }
    }

    // ========================================================================
    // Tier List
    // ========================================================================

    /// Replaces the whole tier list. Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the clear or the insert fails; the stored list is
    /// then unchanged.
    pub fn replace_tier_list(&mut self, placements: &[TierPlacement]) -> Result<usize, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::tier_list::replace_tier_list_sqlite(conn, placements)
            }
            BackendConnection::Mysql(conn) => {
                mutations::tier_list::replace_tier_list_mysql(conn, placements)
            }
        }
    }

    /// Loads the raw tier list rows joined with their weapons.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_tier_list_rows(&mut self) -> Result<Vec<StoredTierEntry>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::tier_list::load_tier_list_rows_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::tier_list::load_tier_list_rows_mysql(conn),
        }
    }

    /// Counts stored tier list rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_tier_list_entries(&mut self) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::tier_list::count_tier_list_entries_sqlite(conn)
            }
            BackendConnection::Mysql(conn) => queries::tier_list::count_tier_list_entries_mysql(conn),
        }
    }
}
