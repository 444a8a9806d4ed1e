// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service layer of the admin backend.
//!
//! Entity services wrap persistence with validation, uniqueness checks and
//! error translation. Editors and list views build the operator workflows on
//! top of them. Everything here is synchronous; the server serializes access
//! to the persistence adapter.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assets;
mod builds;
mod contributors;
mod editor;
mod error;
mod request_response;
mod roles;
mod tier_list;
mod view;

#[cfg(test)]
mod tests;

pub use assets::{
    AssetError, AssetStore, FileSystemAssetStore, MemoryAssetStore, asset_reference, content_hash,
};
pub use builds::{get_build, list_builds};
pub use contributors::{
    create_contributor, delete_contributor, list_contributors, toggle_contributor_active,
    update_contributor,
};
pub use editor::{ContributorEditor, EditorError, EditorMode, GENERIC_ERROR_MESSAGE, RoleEditor};
pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use request_response::{
    ContributorRequest, ContributorResponse, DeleteResponse, ImageUpload, ListBuildsResponse,
    ListContributorsResponse, ListRolesResponse, ListWeaponsResponse, RoleNameExistsResponse,
    RoleRequest, RoleResponse, SaveTierListRequest, SaveTierListResponse, SetRoleActiveRequest,
    TierListExistsResponse, TierListResponse,
};
pub use roles::{
    create_role, delete_role, list_roles, role_name_exists, toggle_role_active, update_role,
};
pub use tier_list::{
    build_tier_buckets, get_saved_tier_list, get_weapon, has_saved_tier_list, list_weapons,
    list_weapons_by_element, save_tier_list,
};
pub use view::{ContributorListView, RoleListView};
