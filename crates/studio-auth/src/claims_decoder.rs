use crate::{AuthError, Claims, IdentitySource, Result as AuthErrorResult};

use std::panic::Location;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Map, Value};

/// Claims read out of a credential, tagged with whether the signature was
/// checked.
#[derive(Debug, Clone)]
pub struct DecodedClaims {
    pub claims: Claims,
    pub verified: bool,
}

impl DecodedClaims {
    pub fn identity_source(&self) -> IdentitySource {
        if self.verified {
            IdentitySource::VerifiedClaims
        } else {
            IdentitySource::UnverifiedClaims
        }
    }
}

/// Reads the self-contained claims of a bearer credential.
///
/// `Unverified` only base64-decodes the payload segment. Anything it
/// returns is trust-reduced: the signature is never looked at.
pub enum ClaimsDecoder {
    Unverified,
    Hs256 {
        decoding_key: DecodingKey,
        validation: Validation,
    },
}

impl ClaimsDecoder {
    pub fn unverified() -> Self {
        Self::Unverified
    }

    /// Verify the HS256 signature and expiry before trusting the claims.
    pub fn with_hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = 30;
        validation.required_spec_claims.clear();

        Self::Hs256 {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Build from an optional configured secret.
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(secret) => Self::with_hs256(secret.as_bytes()),
            None => Self::unverified(),
        }
    }

    pub fn is_verifying(&self) -> bool {
        matches!(self, Self::Hs256 { .. })
    }

    #[track_caller]
    pub fn decode(&self, token: &str) -> AuthErrorResult<DecodedClaims> {
        match self {
            Self::Unverified => Ok(DecodedClaims {
                claims: Self::decode_payload(token)?,
                verified: false,
            }),
            Self::Hs256 {
                decoding_key,
                validation,
            } => {
                let token_data = decode::<Map<String, Value>>(token, decoding_key, validation)
                    .map_err(|e| {
                        use jsonwebtoken::errors::ErrorKind;
                        match e.kind() {
                            ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                                location: ErrorLocation::from(Location::caller()),
                            },
                            _ => AuthError::JwtDecode {
                                source: e,
                                location: ErrorLocation::from(Location::caller()),
                            },
                        }
                    })?;

                Ok(DecodedClaims {
                    claims: Claims::new(token_data.claims),
                    verified: true,
                })
            }
        }
    }

    #[track_caller]
    fn decode_payload(token: &str) -> AuthErrorResult<Claims> {
        let segments: Vec<&str> = token.trim().split('.').collect();
        if segments.len() != 3 || segments[1].is_empty() {
            return Err(AuthError::malformed("expected three dot-separated segments"));
        }

        let bytes = URL_SAFE_NO_PAD.decode(segments[1].trim_end_matches('='))?;
        let claims: Map<String, Value> = serde_json::from_slice(&bytes)?;
        Ok(Claims::new(claims))
    }
}
