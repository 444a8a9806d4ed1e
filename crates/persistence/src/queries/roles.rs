// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use hunterboard_domain::Role;
use tracing::debug;

use crate::data_models::RoleRow;
use crate::diesel_schema::roles;
use crate::error::PersistenceError;

backend_fn! {
/// Lists every role, ordered by display order then id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_roles(conn: &mut _) -> Result<Vec<Role>, PersistenceError> {
    let rows: Vec<RoleRow> = roles::table
        .select(RoleRow::as_select())
        .order((roles::display_order.asc(), roles::role_id.asc()))
        .load(conn)?;

    debug!(count = rows.len(), "Loaded roles");
    Ok(rows.into_iter().map(Role::from).collect())
}
}

backend_fn! {
/// Retrieves one role.
///
/// # Errors
///
/// Returns `RoleNotFound` if no row has this id.
pub fn get_role(conn: &mut _, role_id: i64) -> Result<Role, PersistenceError> {
    roles::table
        .filter(roles::role_id.eq(role_id))
        .select(RoleRow::as_select())
        .first(conn)
        .optional()?
        .map(Role::from)
        .ok_or(PersistenceError::RoleNotFound(role_id))
}
}

backend_fn! {
/// Checks whether a role with exactly this name exists.
///
/// Names compare as stored, without trimming or case folding. When
/// `exclude_id` is set, that role is left out of the check so a role being
/// edited does not collide with itself.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn role_name_exists(
    conn: &mut _,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = roles::table.filter(roles::name.eq(name)).into_boxed();

    if let Some(id) = exclude_id {
        query = query.filter(roles::role_id.ne(id));
    }

    let count = query.count().get_result::<i64>(conn)?;
    Ok(count > 0)
}
}
