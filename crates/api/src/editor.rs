// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contributor and role editor workflows.
//!
//! An editor holds the form state of one create or edit dialog. Submitting
//! validates locally, calls the matching service operation and, on success,
//! invokes the caller's refresh callback and closes. On failure the editor
//! stays open with its form intact and the error recorded, either against a
//! field or as one operator-facing message.

use hunterboard_domain::{
    Contributor, ContributorDraft, DomainError, ImageAttachment, Role, RoleDraft,
    contributor_field_errors, role_field_errors,
};
use hunterboard_persistence::Persistence;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::assets::AssetStore;
use crate::contributors::{create_contributor, update_contributor};
use crate::error::ApiError;
use crate::roles::{create_role, update_role};

/// Shown when a failure carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("A submission is already in progress")]
    Busy,
    #[error("The editor is closed")]
    Closed,
    /// Local validation failed; see the editor's field errors.
    #[error("The form has {0} invalid field(s)")]
    InvalidFields(usize),
    /// The service rejected the submission.
    #[error("{0}")]
    Rejected(String),
}

/// Whether an editor creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(i64),
}

/// Submission bookkeeping shared by both editors.
#[derive(Debug, Default)]
pub struct EditorState {
    field_errors: BTreeMap<String, String>,
    error_message: Option<String>,
    submitting: bool,
    closed: bool,
}

impl EditorState {
    pub fn begin(&mut self, local_errors: Vec<DomainError>) -> Result<(), EditorError> {
        if self.closed {
            return Err(EditorError::Closed);
        }
        if self.submitting {
            return Err(EditorError::Busy);
        }

        self.error_message = None;
        self.field_errors = local_errors
            .iter()
            .map(|err| (err.field().to_string(), err.to_string()))
            .collect();

        if !self.field_errors.is_empty() {
            return Err(EditorError::InvalidFields(self.field_errors.len()));
        }

        self.submitting = true;
        Ok(())
    }

    pub fn finish<T>(
        &mut self,
        result: Result<T, ApiError>,
        persistence: &mut Persistence,
        on_success: impl FnOnce(&mut Persistence),
    ) -> Result<T, EditorError> {
        self.submitting = false;

        match result {
            Ok(value) => {
                on_success(persistence);
                self.closed = true;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "Editor submission rejected");
                let message: String = if err.message().trim().is_empty() {
                    String::from(GENERIC_ERROR_MESSAGE)
                } else {
                    err.message().to_string()
                };

                if let Some(field) = error_field(&err) {
                    self.field_errors.insert(field.to_string(), message.clone());
                }
                self.error_message = Some(message.clone());
                Err(EditorError::Rejected(message))
            }
        }
    }
}

/// Maps a service error back onto the form field it concerns, if any.
fn error_field(err: &ApiError) -> Option<&str> {
    match err {
        ApiError::InvalidInput { field, .. } => Some(field.as_str()),
        ApiError::DomainRuleViolation { rule, .. } if rule == "unique_role_name" => Some("name"),
        _ => None,
    }
}

macro_rules! editor_accessors {
    () => {
        #[must_use]
        pub const fn mode(&self) -> EditorMode {
            self.mode
        }

        /// The error recorded against one form field.
        #[must_use]
        pub fn field_error(&self, field: &str) -> Option<&str> {
            self.state.field_errors.get(field).map(String::as_str)
        }

        #[must_use]
        pub const fn field_errors(&self) -> &BTreeMap<String, String> {
            &self.state.field_errors
        }

        /// The last remote failure, as shown to the operator.
        #[must_use]
        pub fn error_message(&self) -> Option<&str> {
            self.state.error_message.as_deref()
        }

        #[must_use]
        pub const fn is_submitting(&self) -> bool {
            self.state.submitting
        }

        #[must_use]
        pub const fn is_closed(&self) -> bool {
            self.state.closed
        }

        /// Closes the editor without submitting.
        pub fn cancel(&mut self) {
            self.state.closed = true;
        }
    };
}

/// The contributor create/edit dialog.
#[derive(Debug)]
pub struct ContributorEditor {
    mode: EditorMode,
    form: ContributorDraft,
    image: Option<ImageAttachment>,
    state: EditorState,
}

impl ContributorEditor {
    /// Opens an empty form for a new contributor.
    #[must_use]
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            form: ContributorDraft {
                active: true,
                ..ContributorDraft::default()
            },
            image: None,
            state: EditorState::default(),
        }
    }

    /// Opens a form pre-filled from `contributor`.
    #[must_use]
    pub fn edit(contributor: &Contributor) -> Self {
        Self {
            mode: EditorMode::Edit(contributor.contributor_id),
            form: ContributorDraft::from_contributor(contributor),
            image: None,
            state: EditorState::default(),
        }
    }

    editor_accessors!();

    #[must_use]
    pub const fn form(&self) -> &ContributorDraft {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut ContributorDraft {
        &mut self.form
    }

    /// Attaches a new portrait, replacing any pending one.
    pub fn attach_image(&mut self, image: ImageAttachment) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Marks the submission as in flight after local validation.
    fn begin_submit(&mut self) -> Result<(), EditorError> {
        let local_errors: Vec<DomainError> =
            contributor_field_errors(&self.form, self.image.as_ref());
        self.state.begin(local_errors)
    }

    /// Validates and submits the form.
    ///
    /// `on_success` runs before the editor closes, typically to refresh a
    /// list view.
    ///
    /// # Errors
    ///
    /// Returns an error if the submission is refused or rejected. The form
    /// is kept either way.
    pub fn submit(
        &mut self,
        persistence: &mut Persistence,
        assets: &dyn AssetStore,
        on_success: impl FnOnce(&mut Persistence),
    ) -> Result<Contributor, EditorError> {
        self.begin_submit()?;
        debug!(mode = ?self.mode, "Submitting contributor editor");

        let result = match self.mode {
            EditorMode::Create => {
                create_contributor(persistence, assets, self.form.clone(), self.image.as_ref())
            }
            EditorMode::Edit(contributor_id) => update_contributor(
                persistence,
                assets,
                contributor_id,
                self.form.clone(),
                self.image.as_ref(),
            ),
        }
        .map(|response| response.contributor);

        self.state.finish(result, persistence, on_success)
    }
}

/// The role create/edit dialog.
#[derive(Debug)]
pub struct RoleEditor {
    mode: EditorMode,
    form: RoleDraft,
    state: EditorState,
}

impl RoleEditor {
    #[must_use]
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            form: RoleDraft {
                active: true,
                ..RoleDraft::default()
            },
            state: EditorState::default(),
        }
    }

    #[must_use]
    pub fn edit(role: &Role) -> Self {
        Self {
            mode: EditorMode::Edit(role.role_id),
            form: RoleDraft::from_role(role),
            state: EditorState::default(),
        }
    }

    editor_accessors!();

    #[must_use]
    pub const fn form(&self) -> &RoleDraft {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut RoleDraft {
        &mut self.form
    }

    fn begin_submit(&mut self) -> Result<(), EditorError> {
        self.state.begin(role_field_errors(&self.form))
    }

    /// Validates and submits the form. Name uniqueness is checked remotely.
    ///
    /// # Errors
    ///
    /// Returns an error if the submission is refused or rejected.
    pub fn submit(
        &mut self,
        persistence: &mut Persistence,
        on_success: impl FnOnce(&mut Persistence),
    ) -> Result<Role, EditorError> {
        self.begin_submit()?;
        debug!(mode = ?self.mode, "Submitting role editor");

        let result = match self.mode {
            EditorMode::Create => create_role(persistence, &self.form),
            EditorMode::Edit(role_id) => update_role(persistence, role_id, &self.form),
        }
        .map(|response| response.role);

        self.state.finish(result, persistence, on_success)
    }
}
