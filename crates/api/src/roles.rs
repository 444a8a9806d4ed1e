// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role service operations.

use hunterboard_domain::{DomainError, Role, RoleDraft, validate_role_draft};
use hunterboard_persistence::Persistence;
use tracing::{debug, info};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    DeleteResponse, ListRolesResponse, RoleNameExistsResponse, RoleResponse,
};

/// Lists every role in display order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_roles(persistence: &mut Persistence) -> Result<ListRolesResponse, ApiError> {
    let roles: Vec<Role> = persistence
        .list_roles()
        .map_err(|e| translate_persistence_error(e, "Failed to list roles"))?;

    debug!(count = roles.len(), "Listed roles");
    Ok(ListRolesResponse { roles })
}

/// Checks whether a role name is already taken.
///
/// The comparison is exact. `exclude_id` lets an update keep its own name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn role_name_exists(
    persistence: &mut Persistence,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<RoleNameExistsResponse, ApiError> {
    let exists: bool = persistence
        .role_name_exists(name, exclude_id)
        .map_err(|e| translate_persistence_error(e, "Failed to check role name"))?;
    Ok(RoleNameExistsResponse { exists })
}

/// Runs local validation then the remote uniqueness check.
fn check_role_draft(
    persistence: &mut Persistence,
    draft: &RoleDraft,
    exclude_id: Option<i64>,
) -> Result<(), ApiError> {
    validate_role_draft(draft).map_err(translate_domain_error)?;

    if role_name_exists(persistence, &draft.name, exclude_id)?.exists {
        return Err(translate_domain_error(DomainError::DuplicateRoleName(
            draft.name.clone(),
        )));
    }
    Ok(())
}

/// Creates a role.
///
/// # Errors
///
/// Returns an error if:
/// - a field fails validation
/// - another role already uses the name
/// - the database write fails
pub fn create_role(
    persistence: &mut Persistence,
    data: &RoleDraft,
) -> Result<RoleResponse, ApiError> {
    check_role_draft(persistence, data, None)?;

    let role_id: i64 = persistence
        .insert_role(data)
        .map_err(|e| translate_persistence_error(e, "Failed to create role"))?;

    let role: Role = persistence
        .get_role(role_id)
        .map_err(|e| translate_persistence_error(e, "Failed to reload role"))?;

    info!(role_id, name = %role.name, "Created role");

    Ok(RoleResponse {
        message: format!("Created role '{}'", role.name),
        role,
    })
}

/// Replaces every field of an existing role.
///
/// # Errors
///
/// Returns an error if validation fails, the name belongs to another role,
/// the role does not exist, or the database write fails.
pub fn update_role(
    persistence: &mut Persistence,
    role_id: i64,
    data: &RoleDraft,
) -> Result<RoleResponse, ApiError> {
    check_role_draft(persistence, data, Some(role_id))?;

    persistence
        .update_role(role_id, data)
        .map_err(|e| translate_persistence_error(e, "Failed to update role"))?;

    let role: Role = persistence
        .get_role(role_id)
        .map_err(|e| translate_persistence_error(e, "Failed to reload role"))?;

    info!(role_id, "Updated role");

    Ok(RoleResponse {
        message: format!("Updated role '{}'", role.name),
        role,
    })
}

/// Deletes a role after clearing it from every contributor.
///
/// # Errors
///
/// Returns an error if the role does not exist or either step fails. A
/// failure leaves both tables unchanged.
pub fn delete_role(persistence: &mut Persistence, role_id: i64) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_role(role_id)
        .map_err(|e| translate_persistence_error(e, "Failed to delete role"))?;

    info!(role_id, "Deleted role");

    Ok(DeleteResponse {
        id: role_id,
        message: format!("Deleted role {role_id}"),
    })
}

/// Sets a role's active flag to `new_state`.
///
/// # Errors
///
/// Returns an error if the role does not exist or the update fails.
pub fn toggle_role_active(
    persistence: &mut Persistence,
    role_id: i64,
    new_state: bool,
) -> Result<RoleResponse, ApiError> {
    persistence
        .set_role_active(role_id, new_state)
        .map_err(|e| translate_persistence_error(e, "Failed to change role status"))?;

    let role: Role = persistence
        .get_role(role_id)
        .map_err(|e| translate_persistence_error(e, "Failed to reload role"))?;

    info!(role_id, active = new_state, "Changed role status");

    let state_word: &str = if new_state { "active" } else { "inactive" };
    Ok(RoleResponse {
        message: format!("Role '{}' is now {state_word}", role.name),
        role,
    })
}
