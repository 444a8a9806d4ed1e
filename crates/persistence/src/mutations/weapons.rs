// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use hunterboard_domain::Weapon;
use tracing::info;

use crate::data_models::NewWeapon;
use crate::diesel_schema::weapons;
use crate::error::PersistenceError;

backend_fn! {
/// Imports catalog weapons, keeping rows whose id already exists.
///
/// Returns the number of weapons actually inserted.
///
/// # Errors
///
/// Returns an error if an insert fails. The import is all-or-nothing.
pub fn import_weapons(conn: &mut _, catalog: &[Weapon]) -> Result<usize, PersistenceError> {
    let inserted: usize = conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut inserted: usize = 0;
        for weapon in catalog {
            inserted += diesel::insert_or_ignore_into(weapons::table)
                .values(NewWeapon::from(weapon))
                .execute(conn)?;
        }
        Ok(inserted)
    })?;

    info!(
        inserted,
        skipped = catalog.len().saturating_sub(inserted),
        "Imported weapon catalog"
    );
    Ok(inserted)
}
}
