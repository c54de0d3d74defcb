// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ES512 (ECDSA over P-521 with SHA-512) compact tokens.
//!
//! `jsonwebtoken` stops at P-384, so this curve is signed with the RustCrypto
//! `p521` crate and the three segments are assembled here. The signature
//! segment is the fixed-width `r || s` encoding (2 x 66 bytes).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use p521::ecdsa::signature::{Signer, Verifier};
use p521::ecdsa::{Signature, SigningKey, VerifyingKey};
use p521::elliptic_curve::sec1::ToEncodedPoint;
use p521::pkcs8::{DecodePrivateKey, DecodePublicKey};
use serde_json::{Map, Value};

use super::claims::Claims;
use super::error::{AuthError, ConfigError};

const HEADER: &[u8] = br#"{"alg":"ES512","typ":"JWT"}"#;

/// P-521 key pair resolved from PKCS#8 / SPKI PEM.
pub(super) struct Es512Keys {
    signing: SigningKey,
    verifying: VerifyingKey,
}

impl Es512Keys {
    pub(super) fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, ConfigError> {
        let private_pem = std::str::from_utf8(private_pem).map_err(|e| invalid("private", e))?;
        let public_pem = std::str::from_utf8(public_pem).map_err(|e| invalid("public", e))?;

        let secret = p521::SecretKey::from_pkcs8_pem(private_pem).map_err(|e| invalid("private", e))?;
        let public = p521::PublicKey::from_public_key_pem(public_pem).map_err(|e| invalid("public", e))?;

        Ok(Self {
            signing: SigningKey::from_bytes(&secret.to_bytes()).map_err(|e| invalid("private", e))?,
            verifying: VerifyingKey::from_sec1_bytes(public.to_encoded_point(false).as_bytes())
                .map_err(|e| invalid("public", e))?,
        })
    }

    pub(super) fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let payload =
            serde_json::to_vec(claims).map_err(|e| AuthError::SigningError(e.to_string()))?;
        let message = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(HEADER),
            URL_SAFE_NO_PAD.encode(payload)
        );

        let signature: Signature = self
            .signing
            .try_sign(message.as_bytes())
            .map_err(|e| AuthError::SigningError(e.to_string()))?;

        Ok(format!("{message}.{}", URL_SAFE_NO_PAD.encode(signature.to_bytes())))
    }

    /// Check the signature and decode the claims.
    ///
    /// The header has already been matched by the caller. Unreadable claims
    /// are `TokenMalformed`; anything wrong with the signature segment is
    /// `TokenSignatureInvalid`.
    pub(super) fn verify(&self, token: &str) -> Result<Map<String, Value>, AuthError> {
        let (message, signature) = token.rsplit_once('.').ok_or(AuthError::TokenMalformed)?;
        let (_, payload) = message.split_once('.').ok_or(AuthError::TokenMalformed)?;

        let claims = URL_SAFE_NO_PAD
            .decode(payload)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Map<String, Value>>(&bytes).ok())
            .ok_or(AuthError::TokenMalformed)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .ok()
            .and_then(|bytes| Signature::from_slice(&bytes).ok())
            .ok_or(AuthError::TokenSignatureInvalid)?;

        self.verifying
            .verify(message.as_bytes(), &signature)
            .map_err(|_| AuthError::TokenSignatureInvalid)?;

        Ok(claims)
    }
}

fn invalid(which: &str, e: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidKeyFile(format!("{which} key: {e}"))
}
