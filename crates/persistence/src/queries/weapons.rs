// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use hunterboard_domain::Weapon;

use crate::data_models::WeaponRow;
use crate::diesel_schema::weapons;
use crate::error::PersistenceError;

backend_fn! {
/// Lists the whole weapon catalog by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_weapons(conn: &mut _) -> Result<Vec<Weapon>, PersistenceError> {
    let rows: Vec<WeaponRow> = weapons::table
        .select(WeaponRow::as_select())
        .order((weapons::name.asc(), weapons::weapon_id.asc()))
        .load(conn)?;
    Ok(rows.into_iter().map(Weapon::from).collect())
}
}

backend_fn! {
/// Lists the weapons of one element by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_weapons_by_element(conn: &mut _, element: &str) -> Result<Vec<Weapon>, PersistenceError> {
    let rows: Vec<WeaponRow> = weapons::table
        .filter(weapons::element.eq(element))
        .select(WeaponRow::as_select())
        .order((weapons::name.asc(), weapons::weapon_id.asc()))
        .load(conn)?;
    Ok(rows.into_iter().map(Weapon::from).collect())
}
}

backend_fn! {
/// Retrieves one weapon. A missing weapon is `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_weapon(conn: &mut _, weapon_id: i64) -> Result<Option<Weapon>, PersistenceError> {
    let row: Option<WeaponRow> = weapons::table
        .filter(weapons::weapon_id.eq(weapon_id))
        .select(WeaponRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Weapon::from))
}
}
