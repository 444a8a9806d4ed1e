// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use hunterboard_domain::ContributorDraft;
use num_traits::ToPrimitive;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::contributors;
use crate::error::PersistenceError;

fn rank_column(rank: i64) -> Result<i32, PersistenceError> {
    rank.to_i32()
        .filter(|value| *value >= 0)
        .ok_or_else(|| PersistenceError::ValueOutOfRange(format!("rank {rank}")))
}

backend_fn! {
/// Inserts a contributor and returns its id.
///
/// # Errors
///
/// Returns an error if the rank does not fit, the role does not exist, or
/// the insert fails.
pub fn insert_contributor(conn: &mut _, draft: &ContributorDraft) -> Result<i64, PersistenceError> {
    let rank: i32 = rank_column(draft.rank)?;

    diesel::insert_into(contributors::table)
        .values((
            contributors::name.eq(&draft.name),
            contributors::role_id.eq(draft.role_id),
            contributors::description.eq(draft.description.as_deref()),
            contributors::contributor_rank.eq(rank),
            contributors::github_url.eq(draft.github_url.as_deref()),
            contributors::discord_username.eq(draft.discord_username.as_deref()),
            contributors::is_active.eq(i32::from(draft.active)),
            contributors::image.eq(draft.image.as_deref()),
        ))
        .execute(conn)?;

    let contributor_id: i64 = conn.get_last_insert_rowid()?;
    info!(contributor_id, name = %draft.name, "Created contributor");
    Ok(contributor_id)
}
}

backend_fn! {
/// Overwrites every editable column of a contributor.
///
/// # Errors
///
/// Returns `ContributorNotFound` if no row has this id.
pub fn update_contributor(
    conn: &mut _,
    contributor_id: i64,
    draft: &ContributorDraft,
) -> Result<(), PersistenceError> {
    let rank: i32 = rank_column(draft.rank)?;

    let rows_affected: usize = diesel::update(contributors::table)
        .filter(contributors::contributor_id.eq(contributor_id))
        .set((
            contributors::name.eq(&draft.name),
            contributors::role_id.eq(draft.role_id),
            contributors::description.eq(draft.description.as_deref()),
            contributors::contributor_rank.eq(rank),
            contributors::github_url.eq(draft.github_url.as_deref()),
            contributors::discord_username.eq(draft.discord_username.as_deref()),
            contributors::is_active.eq(i32::from(draft.active)),
            contributors::image.eq(draft.image.as_deref()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ContributorNotFound(contributor_id));
    }

    info!(contributor_id, "Updated contributor");
    Ok(())
}
}

backend_fn! {
/// Hard-deletes a contributor.
///
/// # Errors
///
/// Returns `ContributorNotFound` if no row has this id.
pub fn delete_contributor(conn: &mut _, contributor_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(contributors::table)
        .filter(contributors::contributor_id.eq(contributor_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ContributorNotFound(contributor_id));
    }

    info!(contributor_id, "Deleted contributor");
    Ok(())
}
}

backend_fn! {
/// Sets the active flag of one contributor.
///
/// # Errors
///
/// Returns `ContributorNotFound` if no row has this id.
pub fn set_contributor_active(
    conn: &mut _,
    contributor_id: i64,
    active: bool,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(contributors::table)
        .filter(contributors::contributor_id.eq(contributor_id))
        .set(contributors::is_active.eq(i32::from(active)))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ContributorNotFound(contributor_id));
    }

    info!(contributor_id, active, "Set contributor active flag");
    Ok(())
}
}

backend_fn! {
/// Clears `role_id` on every contributor referencing a role.
///
/// Returns the number of contributors touched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn nullify_contributor_role(conn: &mut _, role_id: i64) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::update(contributors::table)
        .filter(contributors::role_id.eq(role_id))
        .set(contributors::role_id.eq(None::<i64>))
        .execute(conn)?;

    debug!(role_id, rows_affected, "Cleared role from contributors");
    Ok(rows_affected)
}
}
