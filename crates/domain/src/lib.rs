// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod builds;
mod error;
mod filter;
mod tier_list;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use builds::{
    ArtifactPiece, BuildVariant, ChasseurBuild, CorePiece, SetBonus, StatTarget, find_build,
    load_builds,
};
pub use error::DomainError;
pub use filter::{filter_contributors, filter_roles, matches_search};
pub use tier_list::{TierAssignment, TierBuckets, TierPlacement, flatten_assignment};
pub use types::{Contributor, ContributorDraft, Role, RoleDraft, StatusFilter, TierRank, Weapon};
pub use validation::{
    ImageAttachment, ImageEncoding, MAX_IMAGE_BYTES, contributor_field_errors, role_field_errors,
    validate_contributor_draft, validate_image_attachment, validate_role_draft,
};
