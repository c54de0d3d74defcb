// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Caller-supplied decisions.
//!
//! Each hook is a single-method trait. Closures with the matching signature
//! implement the traits directly:
//!
//! ```rust,ignore
//! let config = JwtAuthConfig::new("zone")
//!     .with_key(KeyMaterial::secret("s3cret"))
//!     .with_authenticator(|c: &LoginCredentials| {
//!         (c.username == "admin" && c.password == "admin").then(|| c.username.clone())
//!     })
//!     .with_authorizer(|user: &AuthenticatedUser, _: &Parts| user.identity == "admin");
//! ```

use axum::{
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use super::claims::AuthenticatedUser;
use super::error::{AuthError, ErrorBody};

/// Credentials presented to the login endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Checks login credentials.
pub trait Authenticator: Send + Sync {
    /// Return the canonical identity to embed in the token, or `None` to
    /// reject the credentials. The identity may differ from the username.
    fn authenticate(&self, credentials: &LoginCredentials) -> Option<String>;
}

impl<F> Authenticator for F
where
    F: Fn(&LoginCredentials) -> Option<String> + Send + Sync,
{
    fn authenticate(&self, credentials: &LoginCredentials) -> Option<String> {
        self(credentials)
    }
}

/// Decides access after authentication succeeded.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, user: &AuthenticatedUser, request: &Parts) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn(&AuthenticatedUser, &Parts) -> bool + Send + Sync,
{
    fn authorize(&self, user: &AuthenticatedUser, request: &Parts) -> bool {
        self(user, request)
    }
}

/// Admits every authenticated user.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn authorize(&self, _user: &AuthenticatedUser, _request: &Parts) -> bool {
        true
    }
}

/// Extra claims added at login and generate time.
///
/// Reserved claims (`id`, `exp`, `orig_iat`) in the returned map are ignored.
pub trait PayloadProvider: Send + Sync {
    fn payload(&self, identity: &str) -> Map<String, Value>;
}

impl<F> PayloadProvider for F
where
    F: Fn(&str) -> Map<String, Value> + Send + Sync,
{
    fn payload(&self, identity: &str) -> Map<String, Value> {
        self(identity)
    }
}

/// Adds no claims.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPayload;

impl PayloadProvider for NoPayload {
    fn payload(&self, _identity: &str) -> Map<String, Value> {
        Map::new()
    }
}

/// Renders a failure response.
///
/// The `WWW-Authenticate` header is added to 401 responses afterwards, so
/// implementations only produce the status and body.
pub trait UnauthorizedResponder: Send + Sync {
    fn respond(&self, status: StatusCode, message: String) -> Response;
}

impl<F> UnauthorizedResponder for F
where
    F: Fn(StatusCode, String) -> Response + Send + Sync,
{
    fn respond(&self, status: StatusCode, message: String) -> Response {
        self(status, message)
    }
}

/// `{"code": <status>, "message": <message>}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResponder;

impl UnauthorizedResponder for JsonResponder {
    fn respond(&self, status: StatusCode, message: String) -> Response {
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

/// Maps a failure kind to the message sent to the client.
pub trait MessageFormatter: Send + Sync {
    fn message(&self, error: &AuthError) -> String;
}

impl<F> MessageFormatter for F
where
    F: Fn(&AuthError) -> String + Send + Sync,
{
    fn message(&self, error: &AuthError) -> String {
        self(error)
    }
}

/// Uses the error's `Display` text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayFormatter;

impl MessageFormatter for DisplayFormatter {
    fn message(&self, error: &AuthError) -> String {
        error.to_string()
    }
}
