// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Locating the candidate token on a request.
//!
//! A [`TokenLookup`] is an ordered list of sources, usually parsed from a
//! string such as `header:Authorization,query:token,cookie:jwt`. Sources are
//! tried in order and the first non-empty token wins. Nothing here checks
//! that the token is authentic.

use std::fmt;
use std::str::FromStr;

use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use super::error::{AuthError, ConfigError};

/// Default header scheme.
pub const DEFAULT_HEAD_NAME: &str = "Bearer";

/// Where a token may be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// `<head name> <token>` in the named header
    Header(String),
    /// Named query parameter
    Query(String),
    /// Named cookie
    Cookie(String),
}

impl TokenSource {
    fn extract(&self, parts: &Parts, head_name: &str) -> Result<Option<String>, AuthError> {
        match self {
            TokenSource::Header(name) => {
                let Some(value) = parts.headers.get(name.as_str()) else {
                    return Ok(None);
                };
                let value = value.to_str().map_err(|_| AuthError::AuthHeaderInvalid)?;
                if value.is_empty() {
                    return Ok(None);
                }
                parse_scheme(value, head_name).map(Some)
            }
            TokenSource::Query(name) => Ok(parts.uri.query().and_then(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .find(|(key, value)| key.as_ref() == name.as_str() && !value.is_empty())
                    .map(|(_, value)| value.into_owned())
            })),
            TokenSource::Cookie(name) => Ok(CookieJar::from_headers(&parts.headers)
                .get(name)
                .map(|cookie| cookie.value().to_string())
                .filter(|value| !value.is_empty())),
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Header(name) => write!(f, "header:{name}"),
            TokenSource::Query(name) => write!(f, "query:{name}"),
            TokenSource::Cookie(name) => write!(f, "cookie:{name}"),
        }
    }
}

impl FromStr for TokenSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidTokenLookup(s.to_string());
        let (kind, name) = s.trim().split_once(':').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }

        match kind.trim() {
            "header" => {
                axum::http::HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
                Ok(TokenSource::Header(name.to_string()))
            }
            "query" => Ok(TokenSource::Query(name.to_string())),
            "cookie" => Ok(TokenSource::Cookie(name.to_string())),
            _ => Err(invalid()),
        }
    }
}

/// Ordered token sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLookup {
    sources: Vec<TokenSource>,
}

impl TokenLookup {
    pub fn new(sources: Vec<TokenSource>) -> Result<Self, ConfigError> {
        if sources.is_empty() {
            return Err(ConfigError::InvalidTokenLookup(
                "at least one source is required".to_string(),
            ));
        }
        Ok(Self { sources })
    }

    pub fn sources(&self) -> &[TokenSource] {
        &self.sources
    }

    /// Find the token on a request.
    ///
    /// A malformed header is remembered but does not stop the search; a later
    /// source can still supply the token.
    pub fn extract(&self, parts: &Parts, head_name: &str) -> Result<String, AuthError> {
        let mut last_error = None;

        for source in &self.sources {
            match source.extract(parts, head_name) {
                Ok(Some(token)) => return Ok(token),
                Ok(None) => {}
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or(AuthError::AuthHeaderEmpty))
    }
}

impl Default for TokenLookup {
    fn default() -> Self {
        Self {
            sources: vec![TokenSource::Header("Authorization".to_string())],
        }
    }
}

impl FromStr for TokenLookup {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sources = s
            .split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(TokenSource::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(sources)
    }
}

/// Split `<head name> <token>`; exactly two segments.
fn parse_scheme(value: &str, head_name: &str) -> Result<String, AuthError> {
    let mut segments = value.split(' ');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(scheme), Some(token), None) if scheme == head_name && !token.is_empty() => {
            Ok(token.to_string())
        }
        _ => Err(AuthError::AuthHeaderInvalid),
    }
}
