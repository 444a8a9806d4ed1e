// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contributor service operations.

use hunterboard_domain::{Contributor, ContributorDraft, ImageAttachment, validate_contributor_draft};
use hunterboard_persistence::{Persistence, PersistenceError};
use tracing::{debug, info};

use crate::assets::AssetStore;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{ContributorResponse, DeleteResponse, ListContributorsResponse};

/// Lists every contributor, ordered by rank ascending.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_contributors(
    persistence: &mut Persistence,
) -> Result<ListContributorsResponse, ApiError> {
    let contributors: Vec<Contributor> = persistence
        .list_contributors()
        .map_err(|e| translate_persistence_error(e, "Failed to list contributors"))?;

    debug!(count = contributors.len(), "Listed contributors");
    Ok(ListContributorsResponse { contributors })
}

/// Validates the draft and stores the attachment, returning the draft to write.
///
/// The attachment is only stored once the referenced role is known to exist.
fn prepare_draft(
    persistence: &mut Persistence,
    assets: &dyn AssetStore,
    data: ContributorDraft,
    image: Option<&ImageAttachment>,
    context: &str,
) -> Result<ContributorDraft, ApiError> {
    validate_contributor_draft(&data, image).map_err(translate_domain_error)?;

    let mut draft: ContributorDraft = data;
    if let Some(image) = image {
        if let Some(role_id) = draft.role_id {
            persistence.get_role(role_id).map_err(|e| match e {
                PersistenceError::RoleNotFound(id) => translate_persistence_error(
                    PersistenceError::ForeignKeyViolation(format!("role {id}")),
                    context,
                ),
                other => translate_persistence_error(other, context),
            })?;
        }
        draft.image = Some(assets.store(image)?);
    }
    Ok(draft)
}

/// Creates a contributor.
///
/// The image, when attached, is stored before the row is written so the
/// row only ever references an existing asset.
///
/// # Errors
///
/// Returns an error if:
/// - a field fails validation
/// - the image cannot be stored
/// - the referenced role does not exist
/// - the database write fails
pub fn create_contributor(
    persistence: &mut Persistence,
    assets: &dyn AssetStore,
    data: ContributorDraft,
    image: Option<&ImageAttachment>,
) -> Result<ContributorResponse, ApiError> {
    let draft: ContributorDraft = prepare_draft(
        persistence,
        assets,
        data,
        image,
        "Failed to create contributor",
    )?;

    let contributor_id: i64 = persistence
        .insert_contributor(&draft)
        .map_err(|e| translate_persistence_error(e, "Failed to create contributor"))?;

    let contributor: Contributor = persistence
        .get_contributor(contributor_id)
        .map_err(|e| translate_persistence_error(e, "Failed to reload contributor"))?;

    info!(contributor_id, name = %contributor.name, "Created contributor");

    Ok(ContributorResponse {
        message: format!("Created contributor '{}'", contributor.name),
        contributor,
    })
}

/// Replaces every field of an existing contributor.
///
/// The contributor must exist before an attachment is stored.
///
/// # Errors
///
/// Returns an error if validation or image storage fails, the contributor
/// does not exist, or the database write fails.
pub fn update_contributor(
    persistence: &mut Persistence,
    assets: &dyn AssetStore,
    contributor_id: i64,
    data: ContributorDraft,
    image: Option<&ImageAttachment>,
) -> Result<ContributorResponse, ApiError> {
    persistence
        .get_contributor(contributor_id)
        .map_err(|e| translate_persistence_error(e, "Failed to load contributor"))?;

    let draft: ContributorDraft = prepare_draft(
        persistence,
        assets,
        data,
        image,
        "Failed to update contributor",
    )?;

    persistence
        .update_contributor(contributor_id, &draft)
        .map_err(|e| translate_persistence_error(e, "Failed to update contributor"))?;

    let contributor: Contributor = persistence
        .get_contributor(contributor_id)
        .map_err(|e| translate_persistence_error(e, "Failed to reload contributor"))?;

    info!(contributor_id, "Updated contributor");

    Ok(ContributorResponse {
        message: format!("Updated contributor '{}'", contributor.name),
        contributor,
    })
}

/// Permanently deletes a contributor.
///
/// # Errors
///
/// Returns an error if the contributor does not exist or the delete fails.
pub fn delete_contributor(
    persistence: &mut Persistence,
    contributor_id: i64,
) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_contributor(contributor_id)
        .map_err(|e| translate_persistence_error(e, "Failed to delete contributor"))?;

    info!(contributor_id, "Deleted contributor");

    Ok(DeleteResponse {
        id: contributor_id,
        message: format!("Deleted contributor {contributor_id}"),
    })
}

/// Flips a contributor's active flag.
///
/// # Errors
///
/// Returns an error if the contributor does not exist or the update fails.
pub fn toggle_contributor_active(
    persistence: &mut Persistence,
    contributor_id: i64,
) -> Result<ContributorResponse, ApiError> {
    let current: Contributor = persistence
        .get_contributor(contributor_id)
        .map_err(|e| translate_persistence_error(e, "Failed to load contributor"))?;

    let new_state: bool = !current.active;
    persistence
        .set_contributor_active(contributor_id, new_state)
        .map_err(|e| translate_persistence_error(e, "Failed to toggle contributor"))?;

    info!(contributor_id, active = new_state, "Toggled contributor");

    let state_word: &str = if new_state { "active" } else { "inactive" };
    Ok(ContributorResponse {
        message: format!("Contributor '{}' is now {state_word}", current.name),
        contributor: Contributor {
            active: new_state,
            ..current
        },
    })
}
