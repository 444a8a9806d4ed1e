// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hunterboard_domain::{ChasseurBuild, find_build, load_builds};

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::ListBuildsResponse;

/// Lists every embedded character build.
///
/// # Errors
///
/// Returns an error if the embedded dataset does not decode.
pub fn list_builds() -> Result<ListBuildsResponse, ApiError> {
    let builds: Vec<ChasseurBuild> = load_builds().map_err(translate_domain_error)?;
    Ok(ListBuildsResponse { builds })
}

/// Returns one character's build plan.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown character.
pub fn get_build(character_id: &str) -> Result<ChasseurBuild, ApiError> {
    find_build(character_id)
        .map_err(translate_domain_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Build"),
            message: format!("No build for character '{character_id}'"),
        })
}
