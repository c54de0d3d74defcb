// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applies [`JwtAuth`] to an entire router subtree. On success the
//! [`AuthenticatedUser`](super::AuthenticatedUser) is stored in the request
//! extensions, where the [`Auth`](super::Auth) extractor picks it up without
//! verifying the token a second time.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/hello", get(hello))
//!     .layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::JwtAuth;

/// Reject the request unless it carries a valid, authorized token.
pub async fn require_auth(
    State(auth): State<Arc<JwtAuth>>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    match auth.authenticate_request(&parts) {
        Ok(user) => {
            tracing::debug!(identity = %user.identity, path = %parts.uri.path(), "Authenticated");
            parts.extensions.insert(user);
            next.run(Request::from_parts(parts, body)).await
        }
        Err(e) => auth.unauthorized(&e),
    }
}
