// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Protected demo endpoint.

use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::auth::{Auth, AuthenticatedUser};

/// Response for GET /auth/hello
#[derive(Debug, Serialize, ToSchema)]
pub struct HelloResponse {
    /// Identity carried by the token
    pub identity: String,
    pub text: String,
    /// All verified claims, reserved ones included
    #[schema(value_type = Object)]
    pub claims: Map<String, Value>,
}

impl From<AuthenticatedUser> for HelloResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            text: "Hello World.".to_string(),
            claims: user.claims().as_map().clone(),
            identity: user.identity,
        }
    }
}

/// Greet the authenticated user.
#[utoipa::path(
    get,
    path = "/auth/hello",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Greeting with the caller's claims", body = HelloResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Forbidden - identity not authorized"),
    )
)]
pub async fn hello(Auth(user): Auth) -> Json<HelloResponse> {
    Json(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ClaimSet;
    use serde_json::json;

    #[test]
    fn hello_response_from_authenticated_user() {
        let Value::Object(map) = json!({"id": "admin", "exp": 10, "orig_iat": 1, "role": "admin"})
        else {
            unreachable!()
        };
        let user = AuthenticatedUser::from_claims(ClaimSet::from(map)).unwrap();

        let response: HelloResponse = user.into();
        assert_eq!(response.identity, "admin");
        assert_eq!(response.text, "Hello World.");
        assert_eq!(response.claims["role"], json!("admin"));
        assert_eq!(response.claims["exp"], json!(10));
    }
}
