// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless JWT authentication for Axum routers.
//!
//! ## Auth Flow
//!
//! 1. Client posts `{username, password}` to `/login`
//! 2. The [`Authenticator`] maps the credentials to a canonical identity
//! 3. Server returns a signed token and its RFC 3339 expiry
//! 4. Client sends `Authorization: Bearer <token>` on protected routes
//! 5. [`require_auth`](middleware::require_auth):
//!    - locates the token ([`TokenLookup`])
//!    - verifies algorithm, signature and `exp` ([`TokenSigner`])
//!    - extracts the identity claim
//!    - asks the [`Authorizer`]
//! 6. `/auth/refresh_token` reissues the token while `orig_iat` is inside the
//!    refresh window
//!
//! ## Security
//!
//! - The algorithm is fixed per instance; tokens declaring another one are
//!   rejected before any key is used
//! - Expiry is checked strictly, without leeway
//! - Reserved claims (`id`, `exp`, `orig_iat`) cannot be overridden by the
//!   payload hook

pub mod claims;
pub mod config;
pub mod error;
mod es512;
pub mod extractor;
pub mod handlers;
pub mod hooks;
pub mod lifecycle;
pub mod lookup;
pub mod middleware;
pub mod roles;
pub mod service;
pub mod signer;

pub use claims::{AuthenticatedUser, ClaimSet, Claims};
pub use config::{JwtAuthConfig, LoginFields, DEFAULT_TIMEOUT};
pub use error::{AuthError, ConfigError, ErrorBody};
pub use extractor::{Auth, OptionalAuth};
pub use hooks::{
    AllowAll, Authenticator, Authorizer, DisplayFormatter, JsonResponder, LoginCredentials,
    MessageFormatter, NoPayload, PayloadProvider, UnauthorizedResponder,
};
pub use lifecycle::IssuedToken;
pub use lookup::{TokenLookup, TokenSource};
pub use roles::{Role, RoleAuthorizer, RolePayload};
pub use service::JwtAuth;
pub use signer::{KeyMaterial, SigningAlgorithm, TokenSigner};
