// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contributor image storage.
//!
//! Images are content-addressed: the reference is derived from the SHA-256
//! of the bytes, `{hash[0:2]}/{hash}.{ext}`. Identical uploads map to the
//! same reference and are stored once.

use hunterboard_domain::{DomainError, ImageAttachment, ImageEncoding};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info};

/// Asset store errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The attachment's content type is not an accepted image encoding.
    #[error(transparent)]
    Unsupported(#[from] DomainError),

    /// Writing to the backing directory failed.
    #[error("Failed to write asset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory store's lock was poisoned by a panicking writer.
    #[error("Asset store lock poisoned")]
    Poisoned,
}

/// Persists image attachments and hands back a stable reference.
pub trait AssetStore: Send + Sync {
    /// Stores an image and returns its reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoding is not accepted or the write fails.
    fn store(&self, image: &ImageAttachment) -> Result<String, AssetError>;
}

/// Hex-encoded SHA-256 of `bytes`.
#[must_use]
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Computes the content-addressed reference of an image.
///
/// # Errors
///
/// Returns an error if the content type is not an accepted encoding.
pub fn asset_reference(image: &ImageAttachment) -> Result<String, AssetError> {
    let encoding: ImageEncoding = ImageEncoding::from_content_type(&image.content_type)?;
    let hash: String = content_hash(&image.bytes);
    Ok(format!("{}/{hash}.{}", &hash[..2], encoding.extension()))
}

/// Stores images under a base directory.
pub struct FileSystemAssetStore {
    base_path: PathBuf,
}

impl FileSystemAssetStore {
    /// Creates the store, creating `base_path` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let base_path: PathBuf = base_path.into();
        std::fs::create_dir_all(&base_path).map_err(|source| AssetError::Io {
            path: base_path.display().to_string(),
            source,
        })?;

        info!(path = %base_path.display(), "Opened asset directory");
        Ok(Self { base_path })
    }

    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl AssetStore for FileSystemAssetStore {
    fn store(&self, image: &ImageAttachment) -> Result<String, AssetError> {
        let reference: String = asset_reference(image)?;
        let path: PathBuf = self.base_path.join(&reference);

        if path.exists() {
            debug!(reference = %reference, "Asset already stored");
            return Ok(reference);
        }

        let io_error = |source: std::io::Error| AssetError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        // Write then rename so readers never see a partial file.
        let temp_path: PathBuf = path.with_extension("tmp");
        std::fs::write(&temp_path, &image.bytes).map_err(io_error)?;
        std::fs::rename(&temp_path, &path).map_err(io_error)?;

        info!(reference = %reference, size = image.bytes.len(), "Stored asset");
        Ok(reference)
    }
}

/// Keeps images in memory. Used by tests and ephemeral servers.
#[derive(Default)]
pub struct MemoryAssetStore {
    assets: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryAssetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored bytes for a reference.
    #[must_use]
    pub fn get(&self, reference: &str) -> Option<Vec<u8>> {
        self.assets
            .lock()
            .ok()
            .and_then(|assets| assets.get(reference).cloned())
    }

    /// Number of distinct stored assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.lock().map_or(0, |assets| assets.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetStore for MemoryAssetStore {
    fn store(&self, image: &ImageAttachment) -> Result<String, AssetError> {
        let reference: String = asset_reference(image)?;
        self.assets
            .lock()
            .map_err(|_| AssetError::Poisoned)?
            .entry(reference.clone())
            .or_insert_with(|| image.bytes.clone());
        Ok(reference)
    }
}
