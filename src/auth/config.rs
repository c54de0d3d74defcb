// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication configuration.
//!
//! A [`JwtAuthConfig`] is a plain builder. Nothing is checked until it is
//! handed to [`JwtAuth::new`](super::JwtAuth::new), which validates it once.

use std::sync::Arc;
use std::time::Duration;

use super::hooks::{
    AllowAll, Authenticator, Authorizer, DisplayFormatter, JsonResponder, MessageFormatter,
    NoPayload, PayloadProvider, UnauthorizedResponder,
};
use super::lookup::{TokenLookup, DEFAULT_HEAD_NAME};
use super::signer::{KeyMaterial, SigningAlgorithm};

/// Default token lifetime (1 hour).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3600);

/// JSON field names read from the login body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFields {
    pub username: String,
    pub password: String,
}

impl Default for LoginFields {
    fn default() -> Self {
        Self {
            username: "username".to_string(),
            password: "password".to_string(),
        }
    }
}

/// Authentication configuration.
#[derive(Clone)]
pub struct JwtAuthConfig {
    pub(crate) realm: String,
    pub(crate) algorithm: SigningAlgorithm,
    pub(crate) key: Option<KeyMaterial>,
    pub(crate) timeout: Duration,
    pub(crate) max_refresh: Duration,
    pub(crate) token_lookup: TokenLookup,
    pub(crate) token_head_name: String,
    pub(crate) login_fields: LoginFields,
    pub(crate) authenticator: Option<Arc<dyn Authenticator>>,
    pub(crate) authorizer: Arc<dyn Authorizer>,
    pub(crate) payload: Arc<dyn PayloadProvider>,
    pub(crate) responder: Arc<dyn UnauthorizedResponder>,
    pub(crate) formatter: Arc<dyn MessageFormatter>,
}

impl JwtAuthConfig {
    /// Create a configuration for the given realm.
    ///
    /// Key material and an authenticator must still be supplied.
    pub fn new(realm: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
            algorithm: SigningAlgorithm::default(),
            key: None,
            timeout: DEFAULT_TIMEOUT,
            max_refresh: Duration::ZERO,
            token_lookup: TokenLookup::default(),
            token_head_name: DEFAULT_HEAD_NAME.to_string(),
            login_fields: LoginFields::default(),
            authenticator: None,
            authorizer: Arc::new(AllowAll),
            payload: Arc::new(NoPayload),
            responder: Arc::new(JsonResponder),
            formatter: Arc::new(DisplayFormatter),
        }
    }

    pub fn with_algorithm(mut self, algorithm: SigningAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_key(mut self, key: KeyMaterial) -> Self {
        self.key = Some(key);
        self
    }

    /// Set how long a freshly minted token stays valid.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how long after `timeout` a token may still be refreshed,
    /// counted from its original issue time.
    pub fn with_max_refresh(mut self, max_refresh: Duration) -> Self {
        self.max_refresh = max_refresh;
        self
    }

    pub fn with_token_lookup(mut self, lookup: TokenLookup) -> Self {
        self.token_lookup = lookup;
        self
    }

    pub fn with_token_head_name(mut self, head_name: impl Into<String>) -> Self {
        self.token_head_name = head_name.into();
        self
    }

    pub fn with_login_fields(mut self, fields: LoginFields) -> Self {
        self.login_fields = fields;
        self
    }

    pub fn with_authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    pub fn with_authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizer = Arc::new(authorizer);
        self
    }

    pub fn with_payload(mut self, payload: impl PayloadProvider + 'static) -> Self {
        self.payload = Arc::new(payload);
        self
    }

    pub fn with_responder(mut self, responder: impl UnauthorizedResponder + 'static) -> Self {
        self.responder = Arc::new(responder);
        self
    }

    pub fn with_formatter(mut self, formatter: impl MessageFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }
}

impl std::fmt::Debug for JwtAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthConfig")
            .field("realm", &self.realm)
            .field("algorithm", &self.algorithm)
            .field("key", &self.key)
            .field("timeout", &self.timeout)
            .field("max_refresh", &self.max_refresh)
            .field("token_lookup", &self.token_lookup)
            .field("token_head_name", &self.token_head_name)
            .field("login_fields", &self.login_fields)
            .field("authenticator", &self.authenticator.is_some())
            .finish_non_exhaustive()
    }
}
