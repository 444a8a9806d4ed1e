// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiError, translate_domain_error, translate_persistence_error};
use hunterboard_domain::DomainError;
use hunterboard_persistence::PersistenceError;

#[test]
fn test_field_errors_become_invalid_input() {
    let err = translate_domain_error(DomainError::InvalidName(String::from("Name cannot be empty")));

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Name cannot be empty"),
        }
    );
}

#[test]
fn test_duplicate_role_name_is_rule_violation() {
    let err = translate_persistence_error(
        PersistenceError::DuplicateRoleName(String::from("Dev")),
        "Failed to create role",
    );

    match err {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "unique_role_name");
            assert_eq!(message, "A role named 'Dev' already exists");
        }
        other => panic!("Expected DomainRuleViolation, got: {other:?}"),
    }
}

#[test]
fn test_not_found_errors() {
    assert!(matches!(
        translate_persistence_error(PersistenceError::RoleNotFound(3), "ctx"),
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Role"
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::ContributorNotFound(3), "ctx"),
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Contributor"
    ));
}

#[test]
fn test_database_error_is_internal_with_context() {
    let err = translate_persistence_error(
        PersistenceError::DatabaseError(String::from("disk I/O error")),
        "Failed to list roles",
    );

    match err {
        ApiError::Internal { message } => {
            assert!(message.starts_with("Failed to list roles"));
            assert!(message.contains("disk I/O error"));
        }
        other => panic!("Expected Internal, got: {other:?}"),
    }
}

#[test]
fn test_message_strips_variant_prefix() {
    let err = ApiError::ResourceNotFound {
        resource_type: String::from("Build"),
        message: String::from("No build for character 'x'"),
    };

    assert_eq!(err.message(), "No build for character 'x'");
    assert_eq!(err.to_string(), "Build not found: No build for character 'x'");
}
