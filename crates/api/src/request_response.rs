// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hunterboard_domain::{
    ChasseurBuild, Contributor, ContributorDraft, ImageAttachment, Role, RoleDraft,
    TierAssignment, TierBuckets, Weapon,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A base64-encoded image uploaded with a contributor form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    /// Standard base64 with padding.
    pub data_base64: String,
}

impl ImageUpload {
    /// Decodes the payload into an attachment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` on the `image` field if the payload is not
    /// valid base64.
    pub fn decode(&self) -> Result<ImageAttachment, ApiError> {
        let bytes: Vec<u8> =
            STANDARD
                .decode(self.data_base64.trim())
                .map_err(|e| ApiError::InvalidInput {
                    field: String::from("image"),
                    message: format!("Image is not valid base64: {e}"),
                })?;
        Ok(ImageAttachment::new(self.content_type.clone(), bytes))
    }
}

/// API request to create or update a contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRequest {
    #[serde(flatten)]
    pub contributor: ContributorDraft,
    /// A new image. When absent, `contributor.image` is kept as is.
    #[serde(default)]
    pub image_upload: Option<ImageUpload>,
}

/// API response for a contributor create, update or toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorResponse {
    pub contributor: Contributor,
    /// A success message.
    pub message: String,
}

/// API response listing contributors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListContributorsResponse {
    pub contributors: Vec<Contributor>,
}

/// API request to create or update a role.
pub type RoleRequest = RoleDraft;

/// API response for a role create, update or activation change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleResponse {
    pub role: Role,
    /// A success message.
    pub message: String,
}

/// API response listing roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRolesResponse {
    pub roles: Vec<Role>,
}

/// API request to set a role's active flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRoleActiveRequest {
    pub active: bool,
}

/// API response for a role name availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleNameExistsResponse {
    pub exists: bool,
}

/// API response for a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// The id of the deleted record.
    pub id: i64,
    /// A success message.
    pub message: String,
}

/// API response listing weapons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWeaponsResponse {
    pub weapons: Vec<Weapon>,
}

/// API request to save the tier list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveTierListRequest {
    /// Label to ordered weapon ids. Missing labels save as empty.
    pub tiers: TierAssignment,
}

/// API response for a successful tier list save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveTierListResponse {
    /// Number of entries now stored.
    pub saved_entries: usize,
    /// A success message.
    pub message: String,
}

/// API response carrying the saved tier list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierListResponse {
    /// Always all seven labels, best first.
    pub tiers: TierBuckets,
}

/// API response for the tier list existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierListExistsResponse {
    pub exists: bool,
}

/// API response listing every character build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBuildsResponse {
    pub builds: Vec<ChasseurBuild>,
}
