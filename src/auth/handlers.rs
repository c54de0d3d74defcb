// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login and refresh endpoints.
//!
//! Failures are rendered through [`JwtAuth::unauthorized`] so they share the
//! body shape and challenge header of the middleware.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use super::{Auth, JwtAuth};
use crate::auth::error::ErrorBody;
use crate::models::{LoginRequest, TokenResponse};

/// Exchange a username and password for a token.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Missing username or password", body = ErrorBody),
        (status = 401, description = "Incorrect username or password", body = ErrorBody),
        (status = 500, description = "Token could not be signed", body = ErrorBody),
    )
)]
pub async fn login(State(auth): State<Arc<JwtAuth>>, body: Bytes) -> Response {
    let issued = auth
        .parse_login(&body)
        .and_then(|credentials| auth.login(&credentials));

    match issued {
        Ok(issued) => Json(issued.to_response()).into_response(),
        Err(e) => auth.unauthorized(&e),
    }
}

/// Exchange a valid token for a fresh one.
///
/// The new token keeps the original issue time, so a session can only be
/// extended until the refresh window closes.
#[utoipa::path(
    get,
    path = "/auth/refresh_token",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Token refreshed", body = TokenResponse),
        (status = 401, description = "Invalid token or refresh window closed", body = ErrorBody),
        (status = 403, description = "Identity not authorized", body = ErrorBody),
    )
)]
pub async fn refresh(State(auth): State<Arc<JwtAuth>>, Auth(user): Auth) -> Response {
    match auth.refresh(user.claims()) {
        Ok(issued) => Json(issued.to_response()).into_response(),
        Err(e) => auth.unauthorized(&e),
    }
}
