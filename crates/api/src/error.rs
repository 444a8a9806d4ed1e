// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use hunterboard_domain::DomainError;
use hunterboard_persistence::PersistenceError;
use tracing::error;

use crate::assets::AssetError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The operator-facing message, without the variant prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::DomainRuleViolation { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::Internal { message } => message,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AssetError> for ApiError {
    fn from(err: AssetError) -> Self {
        error!(error = %err, "Asset store failure");
        Self::Internal {
            message: format!("Failed to store image: {err}"),
        }
    }
}

/// Translates a domain error into an API error.
///
/// Field-level problems become `InvalidInput`; rule conflicts become
/// `DomainRuleViolation`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: String = err.field().to_string();
    match err {
        DomainError::DuplicateRoleName(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_role_name"),
            message: err.to_string(),
        },
        DomainError::InvalidBuildData(_) => ApiError::Internal {
            message: err.to_string(),
        },
        DomainError::InvalidName(msg)
        | DomainError::InvalidGradient(msg)
        | DomainError::InvalidBorderColor(msg) => ApiError::InvalidInput {
            field,
            message: msg,
        },
        DomainError::MissingRole
        | DomainError::NegativeRank(_)
        | DomainError::UnsupportedImageType(_)
        | DomainError::ImageTooLarge { .. }
        | DomainError::EmptyImage
        | DomainError::UnknownTierRank(_)
        | DomainError::UnknownStatusFilter(_) => ApiError::InvalidInput {
            field,
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// `context` names the operation and prefixes internal error messages.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, context: &str) -> ApiError {
    match err {
        PersistenceError::ContributorNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Contributor"),
            message: format!("Contributor {id} does not exist"),
        },
        PersistenceError::RoleNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Role"),
            message: format!("Role {id} does not exist"),
        },
        PersistenceError::DuplicateRoleName(name) => {
            translate_domain_error(DomainError::DuplicateRoleName(name))
        }
        PersistenceError::ForeignKeyViolation(msg) => ApiError::DomainRuleViolation {
            rule: String::from("referential_integrity"),
            message: format!("{context}: a referenced record does not exist ({msg})"),
        },
        PersistenceError::ValueOutOfRange(msg) => ApiError::InvalidInput {
            field: String::from("value"),
            message: format!("Value out of range: {msg}"),
        },
        other => {
            error!(error = %other, context, "Persistence failure");
            ApiError::Internal {
                message: format!("{context}: {other}"),
            }
        }
    }
}
