// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contributor queries.
//!
//! Reads left-join `roles` so each contributor carries the display name of
//! its role, or `None` when unassigned.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use hunterboard_domain::Contributor;
use num_traits::ToPrimitive;
use tracing::debug;

use crate::data_models::ContributorRow;
use crate::diesel_schema::{contributors, roles};
use crate::error::PersistenceError;

fn into_contributor(
    row: ContributorRow,
    role_name: Option<String>,
) -> Result<Contributor, PersistenceError> {
    let rank: u32 = row.contributor_rank.to_u32().ok_or_else(|| {
        PersistenceError::ValueOutOfRange(format!(
            "contributor {} has rank {}",
            row.contributor_id, row.contributor_rank
        ))
    })?;

    Ok(Contributor {
        contributor_id: row.contributor_id,
        name: row.name,
        role_id: row.role_id,
        role_name,
        description: row.description,
        rank,
        github_url: row.github_url,
        discord_username: row.discord_username,
        active: row.is_active != 0,
        image: row.image,
    })
}

backend_fn! {
/// Lists every contributor, ordered by rank then id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored rank is negative.
pub fn list_contributors(conn: &mut _) -> Result<Vec<Contributor>, PersistenceError> {
    let rows: Vec<(ContributorRow, Option<String>)> = contributors::table
        .left_join(roles::table)
        .select((ContributorRow::as_select(), roles::name.nullable()))
        .order((
            contributors::contributor_rank.asc(),
            contributors::contributor_id.asc(),
        ))
        .load(conn)?;

    debug!(count = rows.len(), "Loaded contributors");

    rows.into_iter()
        .map(|(row, role_name)| into_contributor(row, role_name))
        .collect()
}
}

backend_fn! {
/// Retrieves one contributor.
///
/// # Errors
///
/// Returns `ContributorNotFound` if no row has this id.
pub fn get_contributor(conn: &mut _, contributor_id: i64) -> Result<Contributor, PersistenceError> {
    let row: Option<(ContributorRow, Option<String>)> = contributors::table
        .left_join(roles::table)
        .filter(contributors::contributor_id.eq(contributor_id))
        .select((ContributorRow::as_select(), roles::name.nullable()))
        .first(conn)
        .optional()?;

    let (row, role_name) = row.ok_or(PersistenceError::ContributorNotFound(contributor_id))?;
    into_contributor(row, role_name)
}
}
