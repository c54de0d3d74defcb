// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the authentication endpoints. All types
//! derive `ToSchema` for the OpenAPI document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login body.
///
/// Field names follow the default [`LoginFields`](crate::auth::LoginFields);
/// the handler reads the raw JSON so configured names apply as well.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for POST /login and GET /auth/refresh_token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed JWT
    pub token: String,
    /// Token expiry, RFC 3339 in UTC
    #[schema(example = "2026-01-01T12:00:00Z")]
    pub expire: String,
}
