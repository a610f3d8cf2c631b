use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Malformed credential: {message} {location}")]
    MalformedToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential payload is not valid base64: {source} {location}")]
    PayloadEncoding {
        #[source]
        source: base64::DecodeError,
        location: ErrorLocation,
    },

    #[error("Credential payload is not a JSON object: {source} {location}")]
    PayloadJson {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Credential expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedToken {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedToken { .. } => "MALFORMED_TOKEN",
            Self::PayloadEncoding { .. } => "PAYLOAD_ENCODING",
            Self::PayloadJson { .. } => "PAYLOAD_JSON",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
        }
    }
}

impl From<base64::DecodeError> for AuthError {
    #[track_caller]
    fn from(source: base64::DecodeError) -> Self {
        Self::PayloadEncoding {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for AuthError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::PayloadJson {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
