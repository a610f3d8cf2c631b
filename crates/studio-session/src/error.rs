use studio_client::ClientError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Conditions surfaced by the session manager. None of them is fatal to the
/// process; each resolves to a blocked view or a return to the login route.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Authentication failed: {message} {location}")]
    AuthenticationFailed {
        message: String,
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },

    #[error("Session expired after inactivity {location}")]
    SessionExpired { location: ErrorLocation },

    #[error("Not authenticated {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error("Authenticated by credential only; no identity available {location}")]
    IdentityUnavailable { location: ErrorLocation },
}

impl SessionError {
    #[track_caller]
    pub fn authentication_failed(message: impl Into<String>, source: ClientError) -> Self {
        Self::AuthenticationFailed {
            message: message.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn session_expired() -> Self {
        Self::SessionExpired {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_authenticated() -> Self {
        Self::NotAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn identity_unavailable() -> Self {
        Self::IdentityUnavailable {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// User-friendly recovery hint.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "Check your email and password and try again.",
            Self::SessionExpired { .. } => {
                "Your session ended after a period of inactivity. Please log in again."
            }
            Self::NotAuthenticated { .. } => "Please log in first.",
            Self::IdentityUnavailable { .. } => {
                "Your profile could not be loaded. Log out and back in to refresh it."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
