// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin token extraction for write endpoints.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Proof that the request carried the configured admin token.
///
/// Add it as a handler argument to gate the handler:
///
/// ```ignore
/// async fn handle_delete_role(
///     _admin: AdminSession,
///     AxumState(app_state): AxumState<AppState>,
/// ) -> Result<Json<DeleteResponse>, HttpError> { ... }
/// ```
///
/// # Errors
///
/// Rejects with 401 when the `Authorization: Bearer <token>` header is
/// missing, malformed or wrong, and with 403 when the server has no admin
/// token configured.
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token.as_deref() else {
            warn!("Write attempted but no admin token is configured");
            return Err(SessionError::WritesDisabled);
        };

        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        if !bool::from(token.as_bytes().ct_eq(expected.as_bytes())) {
            warn!("Admin token mismatch");
            return Err(SessionError::InvalidToken);
        }

        Ok(Self)
    }
}

/// Admin token extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// The server was started without an admin token.
    WritesDisabled,
    MissingAuthorizationHeader,
    InvalidAuthorizationHeader,
    InvalidToken,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::WritesDisabled => (
                StatusCode::FORBIDDEN,
                "Writes are disabled: no admin token is configured",
            ),
            Self::MissingAuthorizationHeader => {
                (StatusCode::UNAUTHORIZED, "Missing Authorization header")
            }
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid admin token"),
        };

        HttpError {
            status,
            message: message.to_string(),
        }
        .into_response()
    }
}
