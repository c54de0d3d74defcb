// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.
//!
//! Minting goes through the typed [`Claims`] record; verification hands back
//! the untyped [`ClaimSet`], whose accessors decide whether a token minted
//! elsewhere carries usable reserved claims.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::AuthError;

/// Claim holding the authenticated identity.
pub const IDENTITY_CLAIM: &str = "id";
/// Claim holding the expiry (Unix seconds).
pub const EXPIRY_CLAIM: &str = "exp";
/// Claim holding the original issue time (Unix seconds).
pub const ORIGINAL_ISSUED_AT_CLAIM: &str = "orig_iat";

const RESERVED_CLAIMS: [&str; 3] = [IDENTITY_CLAIM, EXPIRY_CLAIM, ORIGINAL_ISSUED_AT_CLAIM];

/// Claims written into a freshly minted token.
///
/// The reserved claims are typed fields and `extra` never contains their
/// keys, so caller payload cannot shadow them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claims {
    id: String,
    exp: i64,
    orig_iat: i64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Claims {
    /// Build the claim set for a new token.
    ///
    /// `issued_at` becomes `orig_iat`. Any reserved key present in `extra` is
    /// dropped.
    pub fn build(
        identity: impl Into<String>,
        mut extra: Map<String, Value>,
        issued_at: i64,
        expiry: i64,
    ) -> Self {
        for key in RESERVED_CLAIMS {
            extra.remove(key);
        }

        Self {
            id: identity.into(),
            exp: expiry,
            orig_iat: issued_at,
            extra,
        }
    }

    pub fn identity(&self) -> &str {
        &self.id
    }

    pub fn expires_at(&self) -> i64 {
        self.exp
    }

    pub fn original_issued_at(&self) -> i64 {
        self.orig_iat
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Claims decoded from a verified token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    /// Read the identity claim.
    pub fn identity(&self) -> Result<&str, AuthError> {
        self.0
            .get(IDENTITY_CLAIM)
            .and_then(Value::as_str)
            .ok_or(AuthError::MalformedClaims)
    }

    /// Read the original issue time. Only Refresh needs it.
    pub fn original_issued_at(&self) -> Result<i64, AuthError> {
        self.numeric(ORIGINAL_ISSUED_AT_CLAIM)
    }

    /// Read the expiry.
    pub fn expires_at(&self) -> Result<i64, AuthError> {
        self.numeric(EXPIRY_CLAIM)
    }

    /// Look up any claim by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All non-reserved claims.
    pub fn extra(&self) -> Map<String, Value> {
        self.0
            .iter()
            .filter(|(key, _)| !RESERVED_CLAIMS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    fn numeric(&self, key: &str) -> Result<i64, AuthError> {
        let value = self.0.get(key).ok_or(AuthError::MalformedClaims)?;

        // Some issuers write timestamps as floats.
        value
            .as_i64()
            .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .ok_or(AuthError::MalformedClaims)
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Claims> for ClaimSet {
    fn from(claims: Claims) -> Self {
        let mut map = claims.extra;
        map.insert(IDENTITY_CLAIM.to_string(), Value::from(claims.id));
        map.insert(EXPIRY_CLAIM.to_string(), Value::from(claims.exp));
        map.insert(
            ORIGINAL_ISSUED_AT_CLAIM.to_string(),
            Value::from(claims.orig_iat),
        );
        Self(map)
    }
}

/// Authenticated user information extracted from a verified token.
///
/// This is what the middleware attaches to the request extensions and what
/// the [`Authorizer`](super::Authorizer) and protected handlers see.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    /// Canonical identity (`id` claim)
    pub identity: String,
    /// Every claim carried by the token
    pub claims: ClaimSet,
}

impl AuthenticatedUser {
    /// Create from verified claims.
    pub fn from_claims(claims: ClaimSet) -> Result<Self, AuthError> {
        let identity = claims.identity()?.to_string();
        Ok(Self { identity, claims })
    }

    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }
}
