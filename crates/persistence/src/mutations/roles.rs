// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role mutations.
//!
//! The `idx_roles_name` UNIQUE index is the final word on name collisions.
//! A write it rejects surfaces as `DuplicateRoleName` regardless of any
//! earlier application-level check.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use hunterboard_domain::RoleDraft;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::roles;
use crate::error::{PersistenceError, is_unique_violation};
use crate::mutations::contributors::{nullify_contributor_role_mysql, nullify_contributor_role_sqlite};

fn map_role_write_error(err: diesel::result::Error, name: &str) -> PersistenceError {
    if is_unique_violation(&err) {
        PersistenceError::DuplicateRoleName(name.to_string())
    } else {
        PersistenceError::from(err)
    }
}

backend_fn! {
/// Inserts a role and returns its id.
///
/// # Errors
///
/// Returns `DuplicateRoleName` if the name is taken, or an error if the
/// insert fails.
pub fn insert_role(conn: &mut _, draft: &RoleDraft) -> Result<i64, PersistenceError> {
    diesel::insert_into(roles::table)
        .values((
            roles::name.eq(&draft.name),
            roles::gradient.eq(&draft.gradient),
            roles::border_color.eq(&draft.border_color),
            roles::icon.eq(draft.icon.as_deref()),
            roles::display_order.eq(draft.display_order),
            roles::is_active.eq(i32::from(draft.active)),
        ))
        .execute(conn)
        .map_err(|e| map_role_write_error(e, &draft.name))?;

    let role_id: i64 = conn.get_last_insert_rowid()?;
    info!(role_id, name = %draft.name, "Created role");
    Ok(role_id)
}
}

backend_fn! {
/// Overwrites every editable column of a role.
///
/// # Errors
///
/// Returns `RoleNotFound` if no row has this id, or `DuplicateRoleName` if
/// another role already uses the name.
pub fn update_role(conn: &mut _, role_id: i64, draft: &RoleDraft) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(roles::table)
        .filter(roles::role_id.eq(role_id))
        .set((
            roles::name.eq(&draft.name),
            roles::gradient.eq(&draft.gradient),
            roles::border_color.eq(&draft.border_color),
            roles::icon.eq(draft.icon.as_deref()),
            roles::display_order.eq(draft.display_order),
            roles::is_active.eq(i32::from(draft.active)),
        ))
        .execute(conn)
        .map_err(|e| map_role_write_error(e, &draft.name))?;

    if rows_affected == 0 {
        return Err(PersistenceError::RoleNotFound(role_id));
    }

    info!(role_id, "Updated role");
    Ok(())
}
}

backend_fn! {
/// Sets the active flag of one role.
///
/// # Errors
///
/// Returns `RoleNotFound` if no row has this id.
pub fn set_role_active(conn: &mut _, role_id: i64, active: bool) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(roles::table)
        .filter(roles::role_id.eq(role_id))
        .set(roles::is_active.eq(i32::from(active)))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::RoleNotFound(role_id));
    }

    info!(role_id, active, "Set role active flag");
    Ok(())
}
}

backend_fn! {
/// Deletes the role row only. Callers clear references first.
///
/// # Errors
///
/// Returns `RoleNotFound` if no row has this id.
pub fn delete_role_row(conn: &mut _, role_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(roles::table)
        .filter(roles::role_id.eq(role_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::RoleNotFound(role_id));
    }

    Ok(())
}
}

/// Deletes a role after clearing it from every contributor (`SQLite`).
///
/// Both steps share one transaction; if either fails nothing changes.
///
/// # Errors
///
/// Returns `RoleNotFound` if no row has this id, or an error if either
/// statement fails.
pub fn delete_role_sqlite(conn: &mut SqliteConnection, role_id: i64) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let cleared: usize = nullify_contributor_role_sqlite(conn, role_id)?;
        delete_role_row_sqlite(conn, role_id)?;
        info!(role_id, cleared, "Deleted role");
        Ok(())
    })
}

/// Deletes a role after clearing it from every contributor (`MySQL`).
///
/// # Errors
///
/// Returns `RoleNotFound` if no row has this id, or an error if either
/// statement fails.
pub fn delete_role_mysql(conn: &mut MysqlConnection, role_id: i64) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let cleared: usize = nullify_contributor_role_mysql(conn, role_id)?;
        delete_role_row_mysql(conn, role_id)?;
        info!(role_id, cleared, "Deleted role");
        Ok(())
    })
}
