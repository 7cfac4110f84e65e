// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer-token session extraction for the HTTP layer.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use rota_api::{AuthenticatedUser, AuthenticationService};

use crate::{AppState, HttpError};

/// The raw bearer token from the `Authorization` header.
pub struct BearerToken(pub String);

fn bearer_token(parts: &Parts) -> Result<String, HttpError> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(HttpError::missing_credentials)?;

    header
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(HttpError::missing_credentials)
}

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        bearer_token(parts).map(Self)
    }
}

/// The authenticated user behind the request's session token.
///
/// Extraction fails with 401 when the header is missing, the token is
/// unknown, or the session has expired.
pub struct SessionUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = bearer_token(parts)?;
        let persistence = state.persistence.lock().await;
        let user: AuthenticatedUser =
            AuthenticationService::validate_session(&persistence, &token)
                .map_err(rota_api::ApiError::from)?;
        Ok(Self(user))
    }
}
