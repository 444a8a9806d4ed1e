// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_contributor_draft, create_test_persistence, create_test_role_draft,
};
use crate::{
    ApiError, create_role, delete_role, list_roles, role_name_exists, toggle_role_active,
    update_role,
};

#[test]
fn test_create_role() {
    let mut persistence = create_test_persistence();
    let mut draft = create_test_role_draft("Moderator");
    draft.icon = Some(String::from("🛡"));

    let response = create_role(&mut persistence, &draft).unwrap();

    assert_eq!(response.role.name, "Moderator");
    assert_eq!(response.role.icon.as_deref(), Some("🛡"));
    assert!(response.role.active);
}

#[test]
fn test_create_role_rejects_duplicate_name() {
    let mut persistence = create_test_persistence();
    create_role(&mut persistence, &create_test_role_draft("Moderator")).unwrap();

    let result = create_role(&mut persistence, &create_test_role_draft("Moderator"));

    match result.unwrap_err() {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "unique_role_name");
            assert!(message.contains("Moderator"));
        }
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
    assert_eq!(list_roles(&mut persistence).unwrap().roles.len(), 1);
}

#[test]
fn test_role_names_are_case_sensitive() {
    let mut persistence = create_test_persistence();
    create_role(&mut persistence, &create_test_role_draft("Moderator")).unwrap();

    assert!(create_role(&mut persistence, &create_test_role_draft("moderator")).is_ok());
}

#[test]
fn test_update_role_keeps_own_name() {
    let mut persistence = create_test_persistence();
    let role = create_role(&mut persistence, &create_test_role_draft("Moderator"))
        .unwrap()
        .role;

    let mut draft = create_test_role_draft("Moderator");
    draft.border_color = String::from("border-red-500");
    let updated = update_role(&mut persistence, role.role_id, &draft)
        .unwrap()
        .role;

    assert_eq!(updated.name, "Moderator");
    assert_eq!(updated.border_color, "border-red-500");
}

#[test]
fn test_update_role_to_another_roles_name() {
    let mut persistence = create_test_persistence();
    create_role(&mut persistence, &create_test_role_draft("Moderator")).unwrap();
    let other = create_role(&mut persistence, &create_test_role_draft("Artist"))
        .unwrap()
        .role;

    let result = update_role(
        &mut persistence,
        other.role_id,
        &create_test_role_draft("Moderator"),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_role_name"
    ));
}

#[test]
fn test_create_role_rejects_empty_gradient() {
    let mut persistence = create_test_persistence();
    let mut draft = create_test_role_draft("Moderator");
    draft.gradient = String::from("  ");

    match create_role(&mut persistence, &draft).unwrap_err() {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, "gradient"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_role_name_exists_with_exclusion() {
    let mut persistence = create_test_persistence();
    let role = create_role(&mut persistence, &create_test_role_draft("Moderator"))
        .unwrap()
        .role;

    assert!(role_name_exists(&mut persistence, "Moderator", None).unwrap().exists);
    assert!(
        !role_name_exists(&mut persistence, "Moderator", Some(role.role_id))
            .unwrap()
            .exists
    );
    assert!(!role_name_exists(&mut persistence, "Artist", None).unwrap().exists);
}

#[test]
fn test_delete_role_nullifies_contributors() {
    let mut persistence = create_test_persistence();
    let role = create_role(&mut persistence, &create_test_role_draft("Moderator"))
        .unwrap()
        .role;
    let contributor_id = persistence
        .insert_contributor(&create_test_contributor_draft("Jinah", Some(role.role_id), 0))
        .unwrap();

    delete_role(&mut persistence, role.role_id).unwrap();

    let contributor = persistence.get_contributor(contributor_id).unwrap();
    assert_eq!(contributor.role_id, None);
    assert_eq!(contributor.role_name, None);
    assert!(list_roles(&mut persistence).unwrap().roles.is_empty());
}

#[test]
fn test_delete_missing_role() {
    let mut persistence = create_test_persistence();

    match delete_role(&mut persistence, 5).unwrap_err() {
        ApiError::ResourceNotFound { resource_type, .. } => assert_eq!(resource_type, "Role"),
        other => panic!("Expected ResourceNotFound, got: {other:?}"),
    }
}

#[test]
fn test_toggle_role_active_sets_requested_state() {
    let mut persistence = create_test_persistence();
    let role = create_role(&mut persistence, &create_test_role_draft("Moderator"))
        .unwrap()
        .role;

    let response = toggle_role_active(&mut persistence, role.role_id, false).unwrap();
    assert!(!response.role.active);

    // Setting the same state twice is not an error.
    let response = toggle_role_active(&mut persistence, role.role_id, false).unwrap();
    assert!(!response.role.active);
}
