// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::{ContributorDraft, RoleDraft};

/// Largest accepted image attachment, in bytes (2 MiB).
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Accepted image encodings for contributor portraits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageEncoding {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl ImageEncoding {
    /// Resolves an encoding from a MIME content type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnsupportedImageType` for any other content type.
    pub fn from_content_type(content_type: &str) -> Result<Self, DomainError> {
        match content_type.trim().to_lowercase().as_str() {
            "image/png" => Ok(Self::Png),
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/webp" => Ok(Self::Webp),
            "image/gif" => Ok(Self::Gif),
            _ => Err(DomainError::UnsupportedImageType(content_type.to_string())),
        }
    }

    /// File extension used when the image is stored.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }
}

/// An image uploaded alongside a contributor form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    #[must_use]
    pub const fn new(content_type: String, bytes: Vec<u8>) -> Self {
        Self {
            content_type,
            bytes,
        }
    }
}

/// Validates an image attachment's encoding and size.
///
/// # Errors
///
/// Returns an error if the attachment is empty, larger than
/// [`MAX_IMAGE_BYTES`], or not one of the accepted encodings.
pub fn validate_image_attachment(image: &ImageAttachment) -> Result<ImageEncoding, DomainError> {
    let encoding: ImageEncoding = ImageEncoding::from_content_type(&image.content_type)?;

    if image.bytes.is_empty() {
        return Err(DomainError::EmptyImage);
    }

    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(DomainError::ImageTooLarge {
            size: image.bytes.len(),
            max: MAX_IMAGE_BYTES,
        });
    }

    Ok(encoding)
}

/// Collects every field error of a contributor form.
///
/// Errors are reported in form order: name, role, rank, image.
#[must_use]
pub fn contributor_field_errors(
    draft: &ContributorDraft,
    image: Option<&ImageAttachment>,
) -> Vec<DomainError> {
    let mut errors: Vec<DomainError> = Vec::new();

    // Rule: name must not be blank
    if draft.name.trim().is_empty() {
        errors.push(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    // Rule: a role must be selected
    if draft.role_id.is_none() {
        errors.push(DomainError::MissingRole);
    }

    if draft.rank < 0 {
        errors.push(DomainError::NegativeRank(draft.rank));
    }

    if let Some(image) = image
        && let Err(err) = validate_image_attachment(image)
    {
        errors.push(err);
    }

    errors
}

/// Validates a contributor form, reporting the first failing field.
///
/// # Errors
///
/// Returns the first error found by [`contributor_field_errors`].
pub fn validate_contributor_draft(
    draft: &ContributorDraft,
    image: Option<&ImageAttachment>,
) -> Result<(), DomainError> {
    contributor_field_errors(draft, image)
        .into_iter()
        .next()
        .map_or(Ok(()), Err)
}

/// Collects every local field error of a role form.
///
/// Name uniqueness is not checked here; it needs the stored roles.
#[must_use]
pub fn role_field_errors(draft: &RoleDraft) -> Vec<DomainError> {
    let mut errors: Vec<DomainError> = Vec::new();

    if draft.name.trim().is_empty() {
        errors.push(DomainError::InvalidName(String::from(
            "Role name cannot be empty",
        )));
    }

    if draft.gradient.trim().is_empty() {
        errors.push(DomainError::InvalidGradient(String::from(
            "Gradient cannot be empty",
        )));
    }

    if draft.border_color.trim().is_empty() {
        errors.push(DomainError::InvalidBorderColor(String::from(
            "Border color cannot be empty",
        )));
    }

    errors
}

/// Validates a role form, reporting the first failing field.
///
/// # Errors
///
/// Returns the first error found by [`role_field_errors`].
pub fn validate_role_draft(draft: &RoleDraft) -> Result<(), DomainError> {
    role_field_errors(draft).into_iter().next().map_or(Ok(()), Err)
}
