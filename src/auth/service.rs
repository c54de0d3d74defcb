// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The validated authentication core and its per-request state machine.
//!
//! ```text
//! Unauthenticated -> TokenLocated -> TokenVerified -> ClaimsExtracted -> Authorized
//!        |                |                |                 |
//!        +----------------+----------------+-----------------+--> AuthError (401 / 403)
//! ```
//!
//! Every transition either advances or fails; the first failure ends the
//! evaluation and no later hook runs. A [`JwtAuth`] holds nothing mutable, so
//! one instance is shared across all requests behind an `Arc`.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::WWW_AUTHENTICATE, request::Parts, HeaderValue, StatusCode},
    response::Response,
};
use chrono::{DateTime, Utc};

use super::claims::{AuthenticatedUser, ClaimSet};
use super::config::{JwtAuthConfig, LoginFields};
use super::error::{AuthError, ConfigError};
use super::hooks::{
    Authenticator, Authorizer, MessageFormatter, PayloadProvider, UnauthorizedResponder,
};
use super::lookup::TokenLookup;
use super::signer::{SigningAlgorithm, TokenSigner};

/// Whether the latest expiry a token can reach is still a valid timestamp.
///
/// A refresh at the end of the grace window mints `exp` at
/// `orig_iat + timeout + max_refresh + timeout`.
fn expiry_horizon_fits(timeout: Duration, max_refresh: Duration, now: i64) -> bool {
    let timeout = i64::try_from(timeout.as_secs()).ok();
    let max_refresh = i64::try_from(max_refresh.as_secs()).ok();

    timeout
        .zip(max_refresh)
        .and_then(|(timeout, max_refresh)| {
            now.checked_add(timeout)?
                .checked_add(max_refresh)?
                .checked_add(timeout)
        })
        .and_then(|horizon| DateTime::<Utc>::from_timestamp(horizon, 0))
        .is_some()
}

/// Per-request authentication progress.
#[derive(Debug)]
enum AuthState {
    Unauthenticated,
    TokenLocated(String),
    TokenVerified(ClaimSet),
    ClaimsExtracted(AuthenticatedUser),
    Authorized(AuthenticatedUser),
}

impl AuthState {
    fn name(&self) -> &'static str {
        match self {
            AuthState::Unauthenticated => "unauthenticated",
            AuthState::TokenLocated(_) => "token_located",
            AuthState::TokenVerified(_) => "token_verified",
            AuthState::ClaimsExtracted(_) => "claims_extracted",
            AuthState::Authorized(_) => "authorized",
        }
    }
}

/// Validated, immutable authentication configuration.
pub struct JwtAuth {
    realm: String,
    challenge: HeaderValue,
    signer: TokenSigner,
    timeout: Duration,
    max_refresh: Duration,
    token_lookup: TokenLookup,
    token_head_name: String,
    pub(crate) login_fields: LoginFields,
    pub(crate) authenticator: Arc<dyn Authenticator>,
    authorizer: Arc<dyn Authorizer>,
    pub(crate) payload: Arc<dyn PayloadProvider>,
    responder: Arc<dyn UnauthorizedResponder>,
    formatter: Arc<dyn MessageFormatter>,
}

impl JwtAuth {
    /// Validate the configuration.
    ///
    /// This is the only place configuration errors can occur; once built, a
    /// `JwtAuth` never fails for configuration reasons.
    pub fn new(config: JwtAuthConfig) -> Result<Self, ConfigError> {
        if config.realm.trim().is_empty() {
            return Err(ConfigError::MissingRealm);
        }
        let key = config.key.ok_or(ConfigError::MissingSecretKey)?;
        let authenticator = config
            .authenticator
            .ok_or(ConfigError::MissingAuthenticator)?;
        if config.timeout.as_secs() == 0
            || !expiry_horizon_fits(config.timeout, config.max_refresh, Utc::now().timestamp())
        {
            return Err(ConfigError::InvalidTimeout);
        }
        if config.token_head_name.is_empty() || config.token_head_name.contains(' ') {
            return Err(ConfigError::InvalidTokenLookup(format!(
                "invalid token head name {:?}",
                config.token_head_name
            )));
        }

        let challenge = HeaderValue::from_str(&format!("JWT realm={}", config.realm))
            .map_err(|_| ConfigError::InvalidRealm(config.realm.clone()))?;
        let signer = TokenSigner::new(config.algorithm, &key)?;

        tracing::info!(
            realm = %config.realm,
            algorithm = %config.algorithm,
            timeout_secs = config.timeout.as_secs(),
            max_refresh_secs = config.max_refresh.as_secs(),
            "JWT authentication configured"
        );

        Ok(Self {
            realm: config.realm,
            challenge,
            signer,
            timeout: config.timeout,
            max_refresh: config.max_refresh,
            token_lookup: config.token_lookup,
            token_head_name: config.token_head_name,
            login_fields: config.login_fields,
            authenticator,
            authorizer: config.authorizer,
            payload: config.payload,
            responder: config.responder,
            formatter: config.formatter,
        })
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        self.signer.algorithm()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_refresh(&self) -> Duration {
        self.max_refresh
    }

    pub(crate) fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    /// Authenticate and authorize a request.
    pub fn authenticate_request(&self, parts: &Parts) -> Result<AuthenticatedUser, AuthError> {
        self.authenticate_request_at(parts, Utc::now().timestamp())
    }

    /// Authenticate and authorize a request against an explicit clock.
    pub fn authenticate_request_at(
        &self,
        parts: &Parts,
        now: i64,
    ) -> Result<AuthenticatedUser, AuthError> {
        let mut state = AuthState::Unauthenticated;

        loop {
            let stage = state.name();
            state = match self.advance(state, parts, now) {
                Ok(AuthState::Authorized(user)) => return Ok(user),
                Ok(next) => next,
                Err(e) => {
                    tracing::debug!(
                        stage,
                        error_code = e.error_code(),
                        path = %parts.uri.path(),
                        "Request rejected"
                    );
                    return Err(e);
                }
            };
        }
    }

    fn advance(&self, state: AuthState, parts: &Parts, now: i64) -> Result<AuthState, AuthError> {
        match state {
            AuthState::Unauthenticated => self
                .token_lookup
                .extract(parts, &self.token_head_name)
                .map(AuthState::TokenLocated),
            AuthState::TokenLocated(token) => {
                self.verify_token_at(&token, now).map(AuthState::TokenVerified)
            }
            AuthState::TokenVerified(claims) => {
                AuthenticatedUser::from_claims(claims).map(AuthState::ClaimsExtracted)
            }
            AuthState::ClaimsExtracted(user) => {
                if self.authorizer.authorize(&user, parts) {
                    Ok(AuthState::Authorized(user))
                } else {
                    Err(AuthError::Forbidden)
                }
            }
            AuthState::Authorized(user) => Ok(AuthState::Authorized(user)),
        }
    }

    /// Verify a token string without looking at a request.
    pub fn verify_token(&self, token: &str) -> Result<ClaimSet, AuthError> {
        self.verify_token_at(token, Utc::now().timestamp())
    }

    pub fn verify_token_at(&self, token: &str, now: i64) -> Result<ClaimSet, AuthError> {
        self.signer.verify(token, now)
    }

    /// Render a failure through the configured formatter and responder.
    ///
    /// 401 responses carry `WWW-Authenticate: JWT realm=<realm>`.
    pub fn unauthorized(&self, error: &AuthError) -> Response {
        let status = error.status_code();
        let message = self.formatter.message(error);
        let mut response = self.responder.respond(status, message);

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, self.challenge.clone());
        }

        response
    }
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("realm", &self.realm)
            .field("signer", &self.signer)
            .field("timeout", &self.timeout)
            .field("max_refresh", &self.max_refresh)
            .field("token_lookup", &self.token_lookup)
            .finish_non_exhaustive()
    }
}
