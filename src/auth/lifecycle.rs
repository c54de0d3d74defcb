// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token lifecycle: login, refresh and generate.
//!
//! All three end in the same minting step. They differ in how the identity
//! and the original issue time are obtained:
//!
//! | Operation | Identity from | `orig_iat` |
//! |-----------|---------------|------------|
//! | Login | authenticator | now |
//! | Generate | caller | now |
//! | Refresh | verified token | kept from the token |

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::claims::{ClaimSet, Claims};
use super::error::AuthError;
use super::hooks::LoginCredentials;
use super::service::JwtAuth;
use crate::models::TokenResponse;

/// A freshly minted token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Response body shared by login and refresh.
    pub fn to_response(&self) -> TokenResponse {
        TokenResponse {
            token: self.token.clone(),
            expire: self.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

impl JwtAuth {
    /// Read credentials from a login body.
    ///
    /// Anything other than a JSON object carrying non-empty string values for
    /// both configured fields is `MissingLoginValues`.
    pub fn parse_login(&self, body: &[u8]) -> Result<LoginCredentials, AuthError> {
        let values: Map<String, Value> =
            serde_json::from_slice(body).map_err(|_| AuthError::MissingLoginValues)?;

        let field = |name: &str| {
            values
                .get(name)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or(AuthError::MissingLoginValues)
        };

        Ok(LoginCredentials {
            username: field(&self.login_fields.username)?,
            password: field(&self.login_fields.password)?,
        })
    }

    /// Exchange credentials for a token.
    pub fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, AuthError> {
        self.login_at(credentials, Utc::now().timestamp())
    }

    pub fn login_at(
        &self,
        credentials: &LoginCredentials,
        now: i64,
    ) -> Result<IssuedToken, AuthError> {
        let identity = self
            .authenticator
            .authenticate(credentials)
            .ok_or_else(|| {
                tracing::info!(username = %credentials.username, "Login rejected");
                AuthError::FailedAuthentication
            })?;

        self.generate_at(&identity, now)
    }

    /// Mint a token for an identity the caller already trusts.
    pub fn generate(&self, identity: &str) -> Result<IssuedToken, AuthError> {
        self.generate_at(identity, Utc::now().timestamp())
    }

    pub fn generate_at(&self, identity: &str, now: i64) -> Result<IssuedToken, AuthError> {
        let extra = self.payload.payload(identity);
        self.mint(identity, extra, now, now)
    }

    /// Exchange a verified token for a new one.
    ///
    /// The new token keeps `orig_iat` and every non-reserved claim. It is
    /// refused once `now` is past `orig_iat + timeout + max_refresh`.
    pub fn refresh(&self, claims: &ClaimSet) -> Result<IssuedToken, AuthError> {
        self.refresh_at(claims, Utc::now().timestamp())
    }

    pub fn refresh_at(&self, claims: &ClaimSet, now: i64) -> Result<IssuedToken, AuthError> {
        let identity = claims.identity()?;
        let original_issued_at = claims.original_issued_at()?;

        let window = seconds(self.timeout()).saturating_add(seconds(self.max_refresh()));
        if now > original_issued_at.saturating_add(window) {
            tracing::debug!(
                identity,
                original_issued_at,
                "Refresh outside grace window"
            );
            return Err(AuthError::RefreshWindowExpired);
        }

        self.mint(identity, claims.extra(), original_issued_at, now)
    }

    fn mint(
        &self,
        identity: &str,
        extra: Map<String, Value>,
        original_issued_at: i64,
        now: i64,
    ) -> Result<IssuedToken, AuthError> {
        let expiry = now.saturating_add(seconds(self.timeout()));
        let claims = Claims::build(identity, extra, original_issued_at, expiry);
        let token = self.signer().sign(&claims).map_err(|e| {
            tracing::warn!(identity, error = ?e, "Token signing failed");
            e
        })?;

        tracing::info!(identity, expires_at = expiry, "Token issued");

        Ok(IssuedToken {
            token,
            expires_at: timestamp(expiry)?,
            issued_at: timestamp(now)?,
        })
    }
}

fn seconds(duration: std::time::Duration) -> i64 {
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, AuthError> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| AuthError::SigningError(format!("timestamp {secs} out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::service::tests::{test_auth, test_config, NOW};
    use serde_json::json;
    use std::time::Duration;

    fn credentials(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn refresh_auth(timeout: u64, max_refresh: u64) -> JwtAuth {
        JwtAuth::new(
            test_config()
                .with_timeout(Duration::from_secs(timeout))
                .with_max_refresh(Duration::from_secs(max_refresh)),
        )
        .unwrap()
    }

    #[test]
    fn parse_login_reads_default_fields() {
        let auth = test_auth();
        let parsed = auth
            .parse_login(br#"{"username":"admin","password":"admin"}"#)
            .unwrap();
        assert_eq!(parsed, credentials("admin", "admin"));
    }

    #[test]
    fn parse_login_requires_both_fields() {
        let auth = test_auth();
        let bodies: [&[u8]; 7] = [
            br#"{"username":"admin"}"#,
            br#"{"password":"admin"}"#,
            br#"{"username":"","password":"admin"}"#,
            br#"{"username":"admin","password":7}"#,
            br#"[]"#,
            b"",
            b"username=admin&password=admin",
        ];
        for body in bodies {
            assert_eq!(
                auth.parse_login(body),
                Err(AuthError::MissingLoginValues),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn parse_login_uses_configured_fields() {
        let auth = JwtAuth::new(test_config().with_login_fields(crate::auth::LoginFields {
            username: "email".to_string(),
            password: "secret".to_string(),
        }))
        .unwrap();

        let parsed = auth
            .parse_login(br#"{"email":"admin","secret":"admin"}"#)
            .unwrap();
        assert_eq!(parsed, credentials("admin", "admin"));
        assert_eq!(
            auth.parse_login(br#"{"username":"admin","password":"admin"}"#),
            Err(AuthError::MissingLoginValues)
        );
    }

    #[test]
    fn login_then_verify_yields_authenticated_identity() {
        let auth = test_auth();
        let issued = auth.login_at(&credentials("admin", "admin"), NOW).unwrap();

        let claims = auth.verify_token_at(&issued.token, NOW).unwrap();
        assert_eq!(claims.identity(), Ok("admin"));
        assert_eq!(claims.original_issued_at(), Ok(NOW));
        assert_eq!(claims.expires_at(), Ok(NOW + 3600));
        assert_eq!(issued.expires_at.timestamp(), NOW + 3600);
        assert_eq!(issued.issued_at.timestamp(), NOW);
    }

    #[test]
    fn login_embeds_remapped_identity() {
        let auth = test_auth();
        let issued = auth.login_at(&credentials("test", "test"), NOW).unwrap();

        let claims = auth.verify_token_at(&issued.token, NOW).unwrap();
        assert_eq!(claims.identity(), Ok("Administrator"));
    }

    #[test]
    fn login_rejects_wrong_password() {
        let auth = test_auth();
        assert_eq!(
            auth.login_at(&credentials("admin", "test"), NOW),
            Err(AuthError::FailedAuthentication)
        );
    }

    #[test]
    fn payload_is_merged_without_touching_reserved_claims() {
        let auth = JwtAuth::new(test_config().with_payload(|identity: &str| {
            let mut extra = Map::new();
            extra.insert("role".to_string(), json!("admin"));
            extra.insert("id".to_string(), json!(format!("not-{identity}")));
            extra.insert("exp".to_string(), json!(i64::MAX));
            extra
        }))
        .unwrap();

        let issued = auth.generate_at("admin", NOW).unwrap();
        let claims = auth.verify_token_at(&issued.token, NOW).unwrap();
        assert_eq!(claims.identity(), Ok("admin"));
        assert_eq!(claims.expires_at(), Ok(NOW + 3600));
        assert_eq!(claims.get("role"), Some(&json!("admin")));
    }

    #[test]
    fn response_renders_rfc3339_expiry() {
        let auth = test_auth();
        let issued = auth.generate_at("admin", NOW).unwrap();

        let response = issued.to_response();
        assert_eq!(response.token, issued.token);
        assert_eq!(response.expire, "2023-11-14T23:13:20Z");
    }

    #[test]
    fn refresh_preserves_original_issue_time_and_advances_expiry() {
        let auth = refresh_auth(3600, 7200);
        let mut issued = auth.generate_at("admin", NOW).unwrap();
        let mut last_exp = NOW + 3600;

        for step in 1..=5 {
            let now = NOW + step * 1000;
            let claims = auth.verify_token_at(&issued.token, now).unwrap();
            issued = auth.refresh_at(&claims, now).unwrap();

            let refreshed = auth.verify_token_at(&issued.token, now).unwrap();
            assert_eq!(refreshed.original_issued_at(), Ok(NOW));
            let exp = refreshed.expires_at().unwrap();
            assert!(exp > last_exp, "step {step}");
            last_exp = exp;
        }
    }

    #[test]
    fn refresh_keeps_payload_claims() {
        let auth = JwtAuth::new(test_config().with_payload(|_: &str| {
            let mut extra = Map::new();
            extra.insert("tenant".to_string(), json!("acme"));
            extra
        }))
        .unwrap();

        let issued = auth.generate_at("admin", NOW).unwrap();
        let claims = auth.verify_token_at(&issued.token, NOW).unwrap();
        let refreshed = auth.refresh_at(&claims, NOW + 10).unwrap();

        let claims = auth.verify_token_at(&refreshed.token, NOW + 10).unwrap();
        assert_eq!(claims.get("tenant"), Some(&json!("acme")));
        assert_eq!(claims.identity(), Ok("admin"));
    }

    #[test]
    fn refresh_grace_window_boundary() {
        let (timeout, max_refresh) = (3600, 1800);
        let auth = refresh_auth(timeout, max_refresh);
        let boundary = NOW + (timeout + max_refresh) as i64;

        let claims = ClaimSet::from(Claims::build("admin", Map::new(), NOW, i64::MAX));

        assert!(auth.refresh_at(&claims, boundary - 1).is_ok());
        assert!(auth.refresh_at(&claims, boundary).is_ok());
        assert_eq!(
            auth.refresh_at(&claims, boundary + 1),
            Err(AuthError::RefreshWindowExpired)
        );
    }

    #[test]
    fn refresh_without_max_refresh_is_bounded_by_timeout() {
        let auth = refresh_auth(3600, 0);
        let claims = ClaimSet::from(Claims::build("admin", Map::new(), NOW, i64::MAX));

        assert!(auth.refresh_at(&claims, NOW + 3600).is_ok());
        assert_eq!(
            auth.refresh_at(&claims, NOW + 3601),
            Err(AuthError::RefreshWindowExpired)
        );
    }

    #[test]
    fn refresh_requires_original_issue_time() {
        let auth = test_auth();
        let mut map = Map::new();
        map.insert("id".to_string(), json!("admin"));
        map.insert("exp".to_string(), json!(NOW + 60));

        assert_eq!(
            auth.refresh_at(&ClaimSet::from(map), NOW),
            Err(AuthError::MalformedClaims)
        );
    }
}
