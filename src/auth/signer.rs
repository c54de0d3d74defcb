// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token signing and verification.
//!
//! [`TokenSigner`] resolves an algorithm and its key material once, at
//! configuration time, into `jsonwebtoken` encoding and decoding keys (or a
//! P-521 key pair for ES512). Per request it only signs or verifies.
//!
//! ## Verification Order
//!
//! 1. Token must have three segments and a decodable JSON header carrying
//!    `alg` (`TokenMalformed`)
//! 2. Header `alg` must equal the configured algorithm
//!    (`TokenAlgorithmMismatch`), before any key is touched
//! 3. Signature must verify (`TokenSignatureInvalid`)
//! 4. `now > exp` rejects the token (`TokenExpired`), no leeway

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::claims::{ClaimSet, Claims};
use super::error::{AuthError, ConfigError};
use super::es512::Es512Keys;

/// Supported signing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SigningAlgorithm {
    #[default]
    HS256,
    HS384,
    HS512,
    RS256,
    RS384,
    RS512,
    ES256,
    ES384,
    ES512,
}

/// Key family an algorithm belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    Hmac,
    Rsa,
    Ecdsa,
}

impl KeyFamily {
    fn describe(self) -> &'static str {
        match self {
            KeyFamily::Hmac => "a symmetric secret",
            KeyFamily::Rsa => "an RSA key pair",
            KeyFamily::Ecdsa => "an ECDSA key pair",
        }
    }
}

impl SigningAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningAlgorithm::HS256 => "HS256",
            SigningAlgorithm::HS384 => "HS384",
            SigningAlgorithm::HS512 => "HS512",
            SigningAlgorithm::RS256 => "RS256",
            SigningAlgorithm::RS384 => "RS384",
            SigningAlgorithm::RS512 => "RS512",
            SigningAlgorithm::ES256 => "ES256",
            SigningAlgorithm::ES384 => "ES384",
            SigningAlgorithm::ES512 => "ES512",
        }
    }

    pub fn family(&self) -> KeyFamily {
        match self {
            SigningAlgorithm::HS256 | SigningAlgorithm::HS384 | SigningAlgorithm::HS512 => {
                KeyFamily::Hmac
            }
            SigningAlgorithm::RS256 | SigningAlgorithm::RS384 | SigningAlgorithm::RS512 => {
                KeyFamily::Rsa
            }
            SigningAlgorithm::ES256 | SigningAlgorithm::ES384 | SigningAlgorithm::ES512 => {
                KeyFamily::Ecdsa
            }
        }
    }

    /// Map to the `jsonwebtoken` algorithm. ES512 has none.
    fn to_jwt(self) -> Option<Algorithm> {
        match self {
            SigningAlgorithm::HS256 => Some(Algorithm::HS256),
            SigningAlgorithm::HS384 => Some(Algorithm::HS384),
            SigningAlgorithm::HS512 => Some(Algorithm::HS512),
            SigningAlgorithm::RS256 => Some(Algorithm::RS256),
            SigningAlgorithm::RS384 => Some(Algorithm::RS384),
            SigningAlgorithm::RS512 => Some(Algorithm::RS512),
            SigningAlgorithm::ES256 => Some(Algorithm::ES256),
            SigningAlgorithm::ES384 => Some(Algorithm::ES384),
            SigningAlgorithm::ES512 => None,
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HS256" => Ok(SigningAlgorithm::HS256),
            "HS384" => Ok(SigningAlgorithm::HS384),
            "HS512" => Ok(SigningAlgorithm::HS512),
            "RS256" => Ok(SigningAlgorithm::RS256),
            "RS384" => Ok(SigningAlgorithm::RS384),
            "RS512" => Ok(SigningAlgorithm::RS512),
            "ES256" => Ok(SigningAlgorithm::ES256),
            "ES384" => Ok(SigningAlgorithm::ES384),
            "ES512" => Ok(SigningAlgorithm::ES512),
            _ => Err(ConfigError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key material for signing and verification.
#[derive(Clone)]
pub enum KeyMaterial {
    /// Shared secret for the HMAC family
    Secret(Vec<u8>),
    /// PEM encoded key pair for the RSA and ECDSA families
    KeyPair {
        private_pem: Vec<u8>,
        public_pem: Vec<u8>,
    },
}

impl KeyMaterial {
    pub fn secret(secret: impl Into<Vec<u8>>) -> Self {
        KeyMaterial::Secret(secret.into())
    }

    pub fn key_pair(private_pem: impl Into<Vec<u8>>, public_pem: impl Into<Vec<u8>>) -> Self {
        KeyMaterial::KeyPair {
            private_pem: private_pem.into(),
            public_pem: public_pem.into(),
        }
    }

    /// Load a PEM key pair from disk.
    pub fn from_pem_files(
        private_key: impl AsRef<Path>,
        public_key: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let read = |path: &Path| {
            std::fs::read(path).map_err(|e| {
                ConfigError::InvalidKeyFile(format!("{}: {e}", path.display()))
            })
        };

        Ok(KeyMaterial::KeyPair {
            private_pem: read(private_key.as_ref())?,
            public_pem: read(public_key.as_ref())?,
        })
    }

    fn family_name(&self) -> &'static str {
        match self {
            KeyMaterial::Secret(_) => "secret",
            KeyMaterial::KeyPair { .. } => "key pair",
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial::{}(<redacted>)", self.family_name())
    }
}

/// Signs and verifies tokens for exactly one algorithm.
pub struct TokenSigner {
    algorithm: SigningAlgorithm,
    backend: Backend,
}

enum Backend {
    Jwt {
        header: Header,
        encoding: EncodingKey,
        decoding: DecodingKey,
        validation: Validation,
    },
    Es512(Es512Keys),
}

/// The only header field read before the algorithm is checked.
#[derive(Deserialize)]
struct JoseHeader {
    alg: String,
}

impl TokenSigner {
    /// Resolve the algorithm and key material.
    ///
    /// A self-test token is signed and verified so that a key that parses but
    /// cannot sign, or a public key that does not belong to the private key,
    /// fails here rather than on the first request.
    pub fn new(algorithm: SigningAlgorithm, key: &KeyMaterial) -> Result<Self, ConfigError> {
        let mismatch = || ConfigError::KeyAlgorithmMismatch {
            algorithm: algorithm.as_str(),
            expected: algorithm.family().describe(),
        };

        let backend = match (algorithm.to_jwt(), key) {
            (None, KeyMaterial::KeyPair { private_pem, public_pem }) => {
                Backend::Es512(Es512Keys::from_pem(private_pem, public_pem)?)
            }
            (None, KeyMaterial::Secret(_)) => return Err(mismatch()),
            (Some(jwt_algorithm), key) => {
                let (encoding, decoding) = match (algorithm.family(), key) {
                    (KeyFamily::Hmac, KeyMaterial::Secret(secret)) => {
                        if secret.is_empty() {
                            return Err(ConfigError::MissingSecretKey);
                        }
                        (
                            EncodingKey::from_secret(secret),
                            DecodingKey::from_secret(secret),
                        )
                    }
                    (KeyFamily::Rsa, KeyMaterial::KeyPair { private_pem, public_pem }) => (
                        EncodingKey::from_rsa_pem(private_pem).map_err(invalid_key("private"))?,
                        DecodingKey::from_rsa_pem(public_pem).map_err(invalid_key("public"))?,
                    ),
                    (KeyFamily::Ecdsa, KeyMaterial::KeyPair { private_pem, public_pem }) => (
                        EncodingKey::from_ec_pem(private_pem).map_err(invalid_key("private"))?,
                        DecodingKey::from_ec_pem(public_pem).map_err(invalid_key("public"))?,
                    ),
                    _ => return Err(mismatch()),
                };

                let mut validation = Validation::new(jwt_algorithm);
                // Expiry is checked by `verify` against the caller's clock.
                validation.validate_exp = false;
                validation.validate_nbf = false;
                validation.validate_aud = false;
                validation.leeway = 0;
                validation.required_spec_claims.clear();

                Backend::Jwt {
                    header: Header::new(jwt_algorithm),
                    encoding,
                    decoding,
                    validation,
                }
            }
        };

        let signer = Self { algorithm, backend };
        signer.self_test()?;

        Ok(signer)
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Sign the claims into a compact JWT.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        match &self.backend {
            Backend::Jwt {
                header, encoding, ..
            } => encode(header, claims, encoding)
                .map_err(|e| AuthError::SigningError(e.to_string())),
            Backend::Es512(keys) => keys.sign(claims),
        }
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str, now: i64) -> Result<ClaimSet, AuthError> {
        let mut segments = token.split('.');
        let (Some(header), Some(_), Some(_), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(AuthError::TokenMalformed);
        };

        // Any declared algorithm other than ours, including ones no backend
        // implements such as `none`, is a mismatch.
        if declared_algorithm(header)? != self.algorithm.as_str() {
            return Err(AuthError::TokenAlgorithmMismatch);
        }

        let claims = match &self.backend {
            Backend::Jwt {
                decoding,
                validation,
                ..
            } => {
                decode::<Map<String, Value>>(token, decoding, validation)
                    .map_err(|e| match e.kind() {
                        ErrorKind::InvalidSignature => AuthError::TokenSignatureInvalid,
                        ErrorKind::InvalidAlgorithm => AuthError::TokenAlgorithmMismatch,
                        // A signature segment that does not even decode is still a bad
                        // signature, as long as the rest of the token is well formed.
                        _ if claims_readable(token) => AuthError::TokenSignatureInvalid,
                        _ => AuthError::TokenMalformed,
                    })?
                    .claims
            }
            Backend::Es512(keys) => keys.verify(token)?,
        };

        let claims = ClaimSet::from(claims);
        if now > claims.expires_at()? {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    fn self_test(&self) -> Result<(), ConfigError> {
        let claims = Claims::build("self-test", Map::new(), 0, i64::MAX);
        let token = self
            .sign(&claims)
            .map_err(|e| ConfigError::InvalidKeyFile(format!("key cannot sign: {e:?}")))?;

        self.verify(&token, 0).map(|_| ()).map_err(|_| {
            ConfigError::InvalidKeyFile("public key does not match private key".to_string())
        })
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

fn declared_algorithm(header: &str) -> Result<String, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| AuthError::TokenMalformed)?;
    let header: JoseHeader =
        serde_json::from_slice(&bytes).map_err(|_| AuthError::TokenMalformed)?;
    Ok(header.alg)
}

fn invalid_key(which: &'static str) -> impl Fn(jsonwebtoken::errors::Error) -> ConfigError {
    move |e| ConfigError::InvalidKeyFile(format!("{which} key: {e}"))
}

fn claims_readable(token: &str) -> bool {
    jsonwebtoken::dangerous::insecure_decode::<Map<String, Value>>(token).is_ok()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SECRET: &[u8] = b"secret key";
    const NOW: i64 = 1_700_000_000;

    pub(crate) fn rsa_keys() -> KeyMaterial {
        KeyMaterial::key_pair(
            include_bytes!("../../tests/fixtures/rsa_private.pem").to_vec(),
            include_bytes!("../../tests/fixtures/rsa_public.pem").to_vec(),
        )
    }

    pub(crate) fn ec256_keys() -> KeyMaterial {
        KeyMaterial::key_pair(
            include_bytes!("../../tests/fixtures/ec256_private.pem").to_vec(),
            include_bytes!("../../tests/fixtures/ec256_public.pem").to_vec(),
        )
    }

    fn ec384_keys() -> KeyMaterial {
        KeyMaterial::key_pair(
            include_bytes!("../../tests/fixtures/ec384_private.pem").to_vec(),
            include_bytes!("../../tests/fixtures/ec384_public.pem").to_vec(),
        )
    }

    fn ec521_keys() -> KeyMaterial {
        KeyMaterial::key_pair(
            include_bytes!("../../tests/fixtures/ec521_private.pem").to_vec(),
            include_bytes!("../../tests/fixtures/ec521_public.pem").to_vec(),
        )
    }

    fn hmac(algorithm: SigningAlgorithm) -> TokenSigner {
        TokenSigner::new(algorithm, &KeyMaterial::secret(SECRET)).unwrap()
    }

    fn admin_claims(exp: i64) -> Claims {
        Claims::build("admin", Map::new(), NOW, exp)
    }

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("HS256".parse::<SigningAlgorithm>().unwrap(), SigningAlgorithm::HS256);
        assert_eq!("es384".parse::<SigningAlgorithm>().unwrap(), SigningAlgorithm::ES384);
        assert!(matches!(
            "none".parse::<SigningAlgorithm>(),
            Err(ConfigError::UnsupportedAlgorithm(_))
        ));
        assert_eq!(SigningAlgorithm::default(), SigningAlgorithm::HS256);
    }

    #[test]
    fn signs_and_verifies_with_every_supported_family() {
        let signers = [
            hmac(SigningAlgorithm::HS256),
            hmac(SigningAlgorithm::HS384),
            hmac(SigningAlgorithm::HS512),
            TokenSigner::new(SigningAlgorithm::RS256, &rsa_keys()).unwrap(),
            TokenSigner::new(SigningAlgorithm::RS512, &rsa_keys()).unwrap(),
            TokenSigner::new(SigningAlgorithm::ES256, &ec256_keys()).unwrap(),
            TokenSigner::new(SigningAlgorithm::ES384, &ec384_keys()).unwrap(),
            TokenSigner::new(SigningAlgorithm::ES512, &ec521_keys()).unwrap(),
        ];

        for signer in signers {
            let token = signer.sign(&admin_claims(NOW + 3600)).unwrap();
            let claims = signer.verify(&token, NOW).unwrap();
            assert_eq!(claims.identity(), Ok("admin"), "{}", signer.algorithm());
        }
    }

    #[test]
    fn rejects_secret_for_asymmetric_algorithm() {
        let result = TokenSigner::new(SigningAlgorithm::RS256, &KeyMaterial::secret(SECRET));
        assert!(matches!(result, Err(ConfigError::KeyAlgorithmMismatch { .. })));
    }

    #[test]
    fn rejects_key_pair_for_hmac() {
        let result = TokenSigner::new(SigningAlgorithm::HS256, &rsa_keys());
        assert!(matches!(result, Err(ConfigError::KeyAlgorithmMismatch { .. })));
    }

    #[test]
    fn rejects_empty_secret() {
        let result = TokenSigner::new(SigningAlgorithm::HS256, &KeyMaterial::secret(""));
        assert!(matches!(result, Err(ConfigError::MissingSecretKey)));
    }

    #[test]
    fn rejects_garbage_pem() {
        let keys = KeyMaterial::key_pair(b"not a key".to_vec(), b"not a key".to_vec());
        let result = TokenSigner::new(SigningAlgorithm::RS256, &keys);
        assert!(matches!(result, Err(ConfigError::InvalidKeyFile(_))));
    }

    #[test]
    fn rejects_curve_that_does_not_match_algorithm() {
        let result = TokenSigner::new(SigningAlgorithm::ES256, &ec384_keys());
        assert!(matches!(result, Err(ConfigError::InvalidKeyFile(_))));
    }

    #[test]
    fn es512_rejects_other_curves_and_secrets() {
        assert!(matches!(
            TokenSigner::new(SigningAlgorithm::ES512, &ec256_keys()),
            Err(ConfigError::InvalidKeyFile(_))
        ));
        assert!(matches!(
            TokenSigner::new(SigningAlgorithm::ES512, &KeyMaterial::secret(SECRET)),
            Err(ConfigError::KeyAlgorithmMismatch { .. })
        ));
        assert!(matches!(
            TokenSigner::new(SigningAlgorithm::ES384, &ec521_keys()),
            Err(ConfigError::InvalidKeyFile(_))
        ));
    }

    #[test]
    fn es512_public_key_must_belong_to_private_key() {
        let keys = KeyMaterial::key_pair(
            include_bytes!("../../tests/fixtures/ec521_private.pem").to_vec(),
            include_bytes!("../../tests/fixtures/ec521_other_public.pem").to_vec(),
        );
        assert!(matches!(
            TokenSigner::new(SigningAlgorithm::ES512, &keys),
            Err(ConfigError::InvalidKeyFile(_))
        ));
    }

    #[test]
    fn es512_token_expires_strictly() {
        let signer = TokenSigner::new(SigningAlgorithm::ES512, &ec521_keys()).unwrap();
        let token = signer.sign(&admin_claims(NOW)).unwrap();

        assert!(signer.verify(&token, NOW).is_ok());
        assert_eq!(signer.verify(&token, NOW + 1), Err(AuthError::TokenExpired));
    }

    #[test]
    fn loads_key_pair_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let private = dir.path().join("private.pem");
        let public = dir.path().join("public.pem");
        std::fs::write(&private, include_bytes!("../../tests/fixtures/rsa_private.pem")).unwrap();
        std::fs::write(&public, include_bytes!("../../tests/fixtures/rsa_public.pem")).unwrap();

        let keys = KeyMaterial::from_pem_files(&private, &public).unwrap();
        assert!(TokenSigner::new(SigningAlgorithm::RS384, &keys).is_ok());
    }

    #[test]
    fn missing_key_file_is_invalid_key_file() {
        let result = KeyMaterial::from_pem_files("/nonexistent/private.pem", "/nonexistent/public.pem");
        assert!(matches!(result, Err(ConfigError::InvalidKeyFile(_))));
    }

    #[test]
    fn garbage_is_malformed() {
        let signer = hmac(SigningAlgorithm::HS256);
        assert_eq!(signer.verify("garbage", NOW), Err(AuthError::TokenMalformed));
        assert_eq!(signer.verify("a.b.c", NOW), Err(AuthError::TokenMalformed));
        assert_eq!(signer.verify("", NOW), Err(AuthError::TokenMalformed));
    }

    #[test]
    fn every_signature_byte_change_is_detected() {
        for signer in [
            hmac(SigningAlgorithm::HS256),
            TokenSigner::new(SigningAlgorithm::RS256, &rsa_keys()).unwrap(),
            TokenSigner::new(SigningAlgorithm::ES512, &ec521_keys()).unwrap(),
        ] {
            let token = signer.sign(&admin_claims(NOW + 3600)).unwrap();
            let split = token.rfind('.').unwrap() + 1;

            for i in split..token.len() {
                let mut bytes = token.clone().into_bytes();
                bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
                let tampered = String::from_utf8(bytes).unwrap();

                assert_eq!(
                    signer.verify(&tampered, NOW),
                    Err(AuthError::TokenSignatureInvalid),
                    "byte {i} of {}",
                    signer.algorithm()
                );
            }
        }
    }

    #[test]
    fn other_hmac_algorithm_is_a_mismatch() {
        let hs384 = hmac(SigningAlgorithm::HS384);
        let hs256 = hmac(SigningAlgorithm::HS256);

        let token = hs384.sign(&admin_claims(NOW + 3600)).unwrap();
        assert_eq!(hs256.verify(&token, NOW), Err(AuthError::TokenAlgorithmMismatch));
    }

    #[test]
    fn every_cross_algorithm_pair_is_a_mismatch() {
        let signers = [
            hmac(SigningAlgorithm::HS256),
            hmac(SigningAlgorithm::HS512),
            TokenSigner::new(SigningAlgorithm::RS256, &rsa_keys()).unwrap(),
            TokenSigner::new(SigningAlgorithm::RS384, &rsa_keys()).unwrap(),
            TokenSigner::new(SigningAlgorithm::ES256, &ec256_keys()).unwrap(),
            TokenSigner::new(SigningAlgorithm::ES512, &ec521_keys()).unwrap(),
        ];

        for signer in &signers {
            let token = signer.sign(&admin_claims(NOW + 3600)).unwrap();
            for verifier in &signers {
                if verifier.algorithm() == signer.algorithm() {
                    continue;
                }
                assert_eq!(
                    verifier.verify(&token, NOW),
                    Err(AuthError::TokenAlgorithmMismatch),
                    "{} verified by {}",
                    signer.algorithm(),
                    verifier.algorithm()
                );
            }
        }
    }

    #[test]
    fn hs256_token_forged_with_rsa_public_key_is_a_mismatch() {
        // The classic confusion attack: HMAC keyed with the published RSA key.
        let public_pem = include_bytes!("../../tests/fixtures/rsa_public.pem");
        let forger = TokenSigner::new(SigningAlgorithm::HS256, &KeyMaterial::secret(public_pem.to_vec())).unwrap();
        let verifier = TokenSigner::new(SigningAlgorithm::RS256, &rsa_keys()).unwrap();

        let token = forger.sign(&admin_claims(NOW + 3600)).unwrap();
        assert_eq!(verifier.verify(&token, NOW), Err(AuthError::TokenAlgorithmMismatch));
    }

    fn token_with_header(header: &str, signature: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(header);
        let claims = URL_SAFE_NO_PAD.encode(br#"{"id":"admin","exp":9999999999}"#);
        format!("{header}.{claims}.{signature}")
    }

    #[test]
    fn unsigned_token_is_an_algorithm_mismatch() {
        let token = token_with_header(r#"{"alg":"none","typ":"JWT"}"#, "");

        let signer = hmac(SigningAlgorithm::HS256);
        assert_eq!(signer.verify(&token, NOW), Err(AuthError::TokenAlgorithmMismatch));
    }

    #[test]
    fn algorithm_unknown_to_the_verifier_is_a_mismatch() {
        let signer = hmac(SigningAlgorithm::HS256);
        for alg in ["ES512", "PS256", "EdDSA", "hs256", "XYZ"] {
            let token = token_with_header(&format!(r#"{{"alg":"{alg}","typ":"JWT"}}"#), "c2ln");
            assert_eq!(
                signer.verify(&token, NOW),
                Err(AuthError::TokenAlgorithmMismatch),
                "{alg}"
            );
        }
    }

    #[test]
    fn undecodable_header_is_malformed() {
        let signer = hmac(SigningAlgorithm::HS256);
        for header in [r#"{"typ":"JWT"}"#, r#"{"alg":7}"#, "not json"] {
            let token = token_with_header(header, "c2ln");
            assert_eq!(signer.verify(&token, NOW), Err(AuthError::TokenMalformed), "{header}");
        }
        assert_eq!(signer.verify("!!!.e30.c2ln", NOW), Err(AuthError::TokenMalformed));
        assert_eq!(signer.verify("a.b.c.d", NOW), Err(AuthError::TokenMalformed));
    }

    #[test]
    fn expiry_is_strict() {
        let signer = hmac(SigningAlgorithm::HS256);
        let token = signer.sign(&admin_claims(NOW)).unwrap();

        assert!(signer.verify(&token, NOW).is_ok());
        assert_eq!(signer.verify(&token, NOW + 1), Err(AuthError::TokenExpired));
    }

    #[test]
    fn missing_expiry_is_malformed_claims() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "id": "admin" }),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let signer = hmac(SigningAlgorithm::HS256);
        assert_eq!(signer.verify(&token, NOW), Err(AuthError::MalformedClaims));
    }
}
