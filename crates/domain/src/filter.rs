// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory list filters.
//!
//! Filters run over an already fully fetched collection. There is no
//! pagination and no server-side narrowing.

use crate::types::{Contributor, Role, StatusFilter};

/// Case-insensitive substring match. An empty search matches everything.
#[must_use]
pub fn matches_search(haystack: &str, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&search.to_lowercase())
}

/// Filters contributors by search text and status, sorted by rank ascending.
///
/// The search matches the contributor's name or the display name of the
/// associated role. Search and status compose with logical AND.
#[must_use]
pub fn filter_contributors<'a>(
    contributors: &'a [Contributor],
    search: &str,
    status: StatusFilter,
) -> Vec<&'a Contributor> {
    let mut visible: Vec<&Contributor> = contributors
        .iter()
        .filter(|c| {
            matches_search(&c.name, search)
                || c
                    .role_name
                    .as_deref()
                    .is_some_and(|role_name| matches_search(role_name, search))
        })
        .filter(|c| status.matches(c.active))
        .collect();

    visible.sort_by_key(|c| (c.rank, c.contributor_id));
    visible
}

/// Filters roles by name, sorted by display order.
#[must_use]
pub fn filter_roles<'a>(roles: &'a [Role], search: &str) -> Vec<&'a Role> {
    let mut visible: Vec<&Role> = roles
        .iter()
        .filter(|role| matches_search(&role.name, search))
        .collect();

    visible.sort_by_key(|role| (role.display_order, role.role_id));
    visible
}
