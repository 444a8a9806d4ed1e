// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Name is empty or invalid.
    InvalidName(String),
    /// A contributor must be assigned a role.
    MissingRole,
    /// Contributor rank must be zero or greater.
    NegativeRank(i64),
    /// Role gradient is empty.
    InvalidGradient(String),
    /// Role border color is empty.
    InvalidBorderColor(String),
    /// Another role already uses this name.
    DuplicateRoleName(String),
    /// Attached image uses an encoding that is not accepted.
    UnsupportedImageType(String),
    /// Attached image exceeds the size limit.
    ImageTooLarge {
        /// The size of the attachment in bytes.
        size: usize,
        /// The maximum accepted size in bytes.
        max: usize,
    },
    /// Attached image contains no data.
    EmptyImage,
    /// A tier label outside the fixed label set.
    UnknownTierRank(String),
    /// A status filter value outside all/active/inactive.
    UnknownStatusFilter(String),
    /// The embedded build dataset could not be decoded.
    InvalidBuildData(String),
}

impl DomainError {
    /// Returns the form field this error belongs to.
    ///
    /// Errors that are not tied to a single form field report `"form"`.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidName(_) | Self::DuplicateRoleName(_) => "name",
            Self::MissingRole => "role_id",
            Self::NegativeRank(_) => "rank",
            Self::InvalidGradient(_) => "gradient",
            Self::InvalidBorderColor(_) => "border_color",
            Self::UnsupportedImageType(_) | Self::ImageTooLarge { .. } | Self::EmptyImage => {
                "image"
            }
            Self::UnknownTierRank(_) => "tier_rank",
            Self::UnknownStatusFilter(_) => "status",
            Self::InvalidBuildData(_) => "form",
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::MissingRole => write!(f, "A role must be selected"),
            Self::NegativeRank(rank) => {
                write!(f, "Rank must be zero or greater, got {rank}")
            }
            Self::InvalidGradient(msg) => write!(f, "Invalid gradient: {msg}"),
            Self::InvalidBorderColor(msg) => write!(f, "Invalid border color: {msg}"),
            Self::DuplicateRoleName(name) => {
                write!(f, "A role named '{name}' already exists")
            }
            Self::UnsupportedImageType(content_type) => {
                write!(
                    f,
                    "Unsupported image type '{content_type}'. Accepted: PNG, JPEG, WebP, GIF"
                )
            }
            Self::ImageTooLarge { size, max } => {
                write!(f, "Image is {size} bytes, the limit is {max} bytes")
            }
            Self::EmptyImage => write!(f, "Image attachment is empty"),
            Self::UnknownTierRank(value) => {
                write!(
                    f,
                    "Unknown tier rank '{value}'. Must be one of SSS, SS, S, A, B, C, D"
                )
            }
            Self::UnknownStatusFilter(value) => {
                write!(
                    f,
                    "Unknown status filter '{value}'. Must be 'all', 'active' or 'inactive'"
                )
            }
            Self::InvalidBuildData(msg) => write!(f, "Invalid build data: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
