// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! [`AuthError`] covers everything that can go wrong while handling a single
//! request. [`ConfigError`] covers invalid configuration and is only ever
//! returned while building a [`JwtAuth`](super::JwtAuth).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Per-request authentication error.
///
/// Every variant is terminal for the request it occurred in. The `Display`
/// text is stable and is what clients see unless a
/// [`MessageFormatter`](super::MessageFormatter) overrides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No configured source yielded a token
    AuthHeaderEmpty,
    /// Header present but not `<scheme> <token>`
    AuthHeaderInvalid,
    /// Token does not parse as a JWT
    TokenMalformed,
    /// Token declares a different algorithm than the one configured
    TokenAlgorithmMismatch,
    /// Token signature does not verify
    TokenSignatureInvalid,
    /// Token `exp` is in the past
    TokenExpired,
    /// Token is outside its refresh grace window
    RefreshWindowExpired,
    /// A reserved claim is missing or has the wrong type
    MalformedClaims,
    /// Authorization hook rejected the identity
    Forbidden,
    /// Login body absent or incomplete
    MissingLoginValues,
    /// Authenticator rejected the credentials
    FailedAuthentication,
    /// Token could not be signed
    SigningError(String),
}

/// Default JSON body for authentication failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// HTTP status code, repeated in the body
    pub code: u16,
    /// Human readable failure message
    pub message: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::AuthHeaderEmpty => "auth_header_empty",
            AuthError::AuthHeaderInvalid => "auth_header_invalid",
            AuthError::TokenMalformed => "token_malformed",
            AuthError::TokenAlgorithmMismatch => "token_algorithm_mismatch",
            AuthError::TokenSignatureInvalid => "token_signature_invalid",
            AuthError::TokenExpired => "token_expired",
            AuthError::RefreshWindowExpired => "refresh_window_expired",
            AuthError::MalformedClaims => "malformed_claims",
            AuthError::Forbidden => "forbidden",
            AuthError::MissingLoginValues => "missing_login_values",
            AuthError::FailedAuthentication => "failed_authentication",
            AuthError::SigningError(_) => "signing_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::AuthHeaderEmpty
            | AuthError::AuthHeaderInvalid
            | AuthError::TokenMalformed
            | AuthError::TokenAlgorithmMismatch
            | AuthError::TokenSignatureInvalid
            | AuthError::TokenExpired
            | AuthError::RefreshWindowExpired
            | AuthError::MalformedClaims
            | AuthError::FailedAuthentication => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::MissingLoginValues => StatusCode::BAD_REQUEST,
            AuthError::SigningError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::AuthHeaderEmpty => write!(f, "auth header is empty"),
            AuthError::AuthHeaderInvalid => write!(f, "auth header is invalid"),
            AuthError::TokenMalformed => write!(f, "token is malformed"),
            AuthError::TokenAlgorithmMismatch => write!(f, "invalid signing algorithm"),
            AuthError::TokenSignatureInvalid => write!(f, "signature is invalid"),
            AuthError::TokenExpired => write!(f, "token is expired"),
            AuthError::RefreshWindowExpired => write!(f, "token is outside the refresh window"),
            AuthError::MalformedClaims => write!(f, "token claims are malformed"),
            AuthError::Forbidden => {
                write!(f, "you don't have permission to access this resource")
            }
            AuthError::MissingLoginValues => write!(f, "missing username or password"),
            AuthError::FailedAuthentication => write!(f, "incorrect username or password"),
            // The signing backend's detail stays in the logs.
            AuthError::SigningError(_) => write!(f, "failed to create JWT token"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Renders the error with the default `{code, message}` body.
///
/// Middleware and lifecycle handlers go through
/// [`JwtAuth::unauthorized`](super::JwtAuth::unauthorized) instead, which also
/// applies the configured responder, formatter and `WWW-Authenticate` header.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Configuration error, fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("realm is required")]
    MissingRealm,

    #[error("realm cannot be used in a header: {0:?}")]
    InvalidRealm(String),

    #[error("secret key is required")]
    MissingSecretKey,

    #[error("authenticator is required")]
    MissingAuthenticator,

    #[error("invalid key file: {0}")]
    InvalidKeyFile(String),

    #[error("{algorithm} requires {expected} key material")]
    KeyAlgorithmMismatch {
        algorithm: &'static str,
        expected: &'static str,
    },

    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("token timeout must be positive and keep expiry within the timestamp range")]
    InvalidTimeout,

    #[error("invalid token lookup: {0}")]
    InvalidTokenLookup(String),

    #[error("invalid value for {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },
}
