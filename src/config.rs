// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names and defaults for the server binary. The library
//! itself is configured programmatically through
//! [`JwtAuthConfig`](crate::auth::JwtAuthConfig); this module only translates
//! the environment into one.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_REALM` | Realm echoed in `WWW-Authenticate` | `test zone` |
//! | `JWT_ALGORITHM` | `HS256`..`HS512`, `RS256`..`RS512`, `ES256`..`ES512` | `HS256` |
//! | `JWT_SECRET` | HMAC secret | Required for `HS*` |
//! | `JWT_PRIVATE_KEY_FILE` | PEM private key path | Required for `RS*`/`ES*` |
//! | `JWT_PUBLIC_KEY_FILE` | PEM public key path | Required for `RS*`/`ES*` |
//! | `JWT_TIMEOUT_SECS` | Token lifetime | `3600` |
//! | `JWT_MAX_REFRESH_SECS` | Refresh window beyond the lifetime | `0` |
//! | `JWT_TOKEN_LOOKUP` | Comma-separated `header:`/`query:`/`cookie:` sources | `header:Authorization` |
//! | `JWT_TOKEN_HEAD_NAME` | Scheme preceding the token in a header | `Bearer` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::str::FromStr;
use std::time::Duration;

use crate::auth::{
    signer::KeyFamily, ConfigError, JwtAuthConfig, KeyMaterial, SigningAlgorithm, TokenLookup,
};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const JWT_REALM_ENV: &str = "JWT_REALM";
pub const JWT_ALGORITHM_ENV: &str = "JWT_ALGORITHM";
/// Never logged.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const JWT_PRIVATE_KEY_FILE_ENV: &str = "JWT_PRIVATE_KEY_FILE";
pub const JWT_PUBLIC_KEY_FILE_ENV: &str = "JWT_PUBLIC_KEY_FILE";
pub const JWT_TIMEOUT_SECS_ENV: &str = "JWT_TIMEOUT_SECS";
pub const JWT_MAX_REFRESH_SECS_ENV: &str = "JWT_MAX_REFRESH_SECS";
pub const JWT_TOKEN_LOOKUP_ENV: &str = "JWT_TOKEN_LOOKUP";
pub const JWT_TOKEN_HEAD_NAME_ENV: &str = "JWT_TOKEN_HEAD_NAME";
/// `json` selects JSON log lines; anything else is human readable.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_REALM: &str = "test zone";

/// Server settings read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Realm, algorithm, key material, timing and lookup. Hooks are added by
    /// the caller.
    pub auth: JwtAuthConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_var(&var, PORT_ENV)?.unwrap_or(DEFAULT_PORT);

        let algorithm = match var(JWT_ALGORITHM_ENV) {
            Some(value) => SigningAlgorithm::from_str(&value)?,
            None => SigningAlgorithm::default(),
        };

        let realm = var(JWT_REALM_ENV).unwrap_or_else(|| DEFAULT_REALM.to_string());
        let mut auth = JwtAuthConfig::new(realm).with_algorithm(algorithm);

        if let Some(key) = key_material(&var, algorithm)? {
            auth = auth.with_key(key);
        }
        if let Some(secs) = parse_var::<u64>(&var, JWT_TIMEOUT_SECS_ENV)? {
            auth = auth.with_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = parse_var::<u64>(&var, JWT_MAX_REFRESH_SECS_ENV)? {
            auth = auth.with_max_refresh(Duration::from_secs(secs));
        }
        if let Some(lookup) = var(JWT_TOKEN_LOOKUP_ENV) {
            auth = auth.with_token_lookup(TokenLookup::from_str(&lookup)?);
        }
        if let Some(head_name) = var(JWT_TOKEN_HEAD_NAME_ENV) {
            auth = auth.with_token_head_name(head_name);
        }

        Ok(Self { host, port, auth })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HMAC algorithms read the secret; the others read a PEM key pair.
///
/// Missing material is left for [`JwtAuth::new`](crate::auth::JwtAuth::new)
/// to report.
fn key_material(
    var: &impl Fn(&str) -> Option<String>,
    algorithm: SigningAlgorithm,
) -> Result<Option<KeyMaterial>, ConfigError> {
    if algorithm.family() == KeyFamily::Hmac {
        return Ok(var(JWT_SECRET_ENV).map(KeyMaterial::secret));
    }

    match (var(JWT_PRIVATE_KEY_FILE_ENV), var(JWT_PUBLIC_KEY_FILE_ENV)) {
        (Some(private_key), Some(public_key)) => {
            KeyMaterial::from_pem_files(private_key, public_key).map(Some)
        }
        (None, None) => Ok(None),
        (Some(_), None) => Err(ConfigError::InvalidEnv {
            name: JWT_PUBLIC_KEY_FILE_ENV,
            reason: "required when a private key file is set".to_string(),
        }),
        (None, Some(_)) => Err(ConfigError::InvalidEnv {
            name: JWT_PRIVATE_KEY_FILE_ENV,
            reason: "required when a public key file is set".to_string(),
        }),
    }
}

fn parse_var<T>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var(name)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnv {
                name,
                reason: e.to_string(),
            })
        })
        .transpose()
}
