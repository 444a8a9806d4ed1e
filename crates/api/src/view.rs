// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! List views over fully fetched collections.
//!
//! A view never patches its collection in place. Every mutation it performs
//! is followed by a full refetch; a failed refetch keeps the last collection
//! that loaded.

use hunterboard_domain::{Contributor, Role, StatusFilter, filter_contributors, filter_roles};
use hunterboard_persistence::Persistence;
use tracing::warn;

use crate::contributors::{delete_contributor, list_contributors, toggle_contributor_active};
use crate::error::ApiError;
use crate::request_response::{ContributorResponse, DeleteResponse, RoleResponse};
use crate::roles::{delete_role, list_roles, toggle_role_active};

/// The contributor roster with search and status filter.
#[derive(Debug, Default)]
pub struct ContributorListView {
    contributors: Vec<Contributor>,
    search: String,
    status: StatusFilter,
    load_error: Option<String>,
}

impl ContributorListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refetches the whole roster.
    ///
    /// # Errors
    ///
    /// Returns the fetch error. The previous roster is kept.
    pub fn refresh(&mut self, persistence: &mut Persistence) -> Result<(), ApiError> {
        match list_contributors(persistence) {
            Ok(response) => {
                self.contributors = response.contributors;
                self.load_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Contributor refresh failed, keeping previous roster");
                self.load_error = Some(err.message().to_string());
                Err(err)
            }
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub const fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn status(&self) -> StatusFilter {
        self.status
    }

    /// Every fetched contributor, unfiltered.
    #[must_use]
    pub fn all(&self) -> &[Contributor] {
        &self.contributors
    }

    /// The contributors passing the current filters, by rank.
    #[must_use]
    pub fn visible(&self) -> Vec<&Contributor> {
        filter_contributors(&self.contributors, &self.search, self.status)
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Flips a contributor's active flag, then refetches.
    ///
    /// # Errors
    ///
    /// Returns an error if the toggle fails. A failed refetch is recorded in
    /// [`Self::load_error`] instead.
    pub fn toggle_active(
        &mut self,
        persistence: &mut Persistence,
        contributor_id: i64,
    ) -> Result<ContributorResponse, ApiError> {
        let response: ContributorResponse =
            toggle_contributor_active(persistence, contributor_id)?;
        self.refresh_after_mutation(persistence);
        Ok(response)
    }

    /// Deletes a contributor, then refetches.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(
        &mut self,
        persistence: &mut Persistence,
        contributor_id: i64,
    ) -> Result<DeleteResponse, ApiError> {
        let response: DeleteResponse = delete_contributor(persistence, contributor_id)?;
        self.refresh_after_mutation(persistence);
        Ok(response)
    }

    fn refresh_after_mutation(&mut self, persistence: &mut Persistence) {
        let _ = self.refresh(persistence);
    }
}

/// The role catalog with a name search.
#[derive(Debug, Default)]
pub struct RoleListView {
    roles: Vec<Role>,
    search: String,
    load_error: Option<String>,
}

impl RoleListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refetches every role.
    ///
    /// # Errors
    ///
    /// Returns the fetch error. The previous roles are kept.
    pub fn refresh(&mut self, persistence: &mut Persistence) -> Result<(), ApiError> {
        match list_roles(persistence) {
            Ok(response) => {
                self.roles = response.roles;
                self.load_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Role refresh failed, keeping previous roles");
                self.load_error = Some(err.message().to_string());
                Err(err)
            }
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    #[must_use]
    pub fn all(&self) -> &[Role] {
        &self.roles
    }

    /// The roles matching the search, by display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Role> {
        filter_roles(&self.roles, &self.search)
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Sets a role's active flag, then refetches.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_active(
        &mut self,
        persistence: &mut Persistence,
        role_id: i64,
        active: bool,
    ) -> Result<RoleResponse, ApiError> {
        let response: RoleResponse = toggle_role_active(persistence, role_id, active)?;
        self.refresh_after_mutation(persistence);
        Ok(response)
    }

    /// Deletes a role, then refetches.
    ///
    /// Contributors holding the role keep their rows with no role; a
    /// contributor view should be refreshed as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(
        &mut self,
        persistence: &mut Persistence,
        role_id: i64,
    ) -> Result<DeleteResponse, ApiError> {
        let response: DeleteResponse = delete_role(persistence, role_id)?;
        self.refresh_after_mutation(persistence);
        Ok(response)
    }

    fn refresh_after_mutation(&mut self, persistence: &mut Persistence) {
        let _ = self.refresh(persistence);
    }
}
