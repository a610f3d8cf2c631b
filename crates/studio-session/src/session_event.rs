use studio_auth::{Identity, IdentitySource};

use std::fmt;

/// Notifications published by the session manager.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn { identity: Identity },
    /// Boot-time restoration finished with a session in place
    Restored { source: Option<IdentitySource> },
    LoggedOut,
    /// The inactivity window elapsed and the session was logged out
    Expired,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoggedIn { identity } => write!(f, "Logged in as {}", identity.display_name()),
            Self::Restored { source: Some(source) } => {
                write!(f, "Session restored from {source}")
            }
            Self::Restored { source: None } => {
                write!(f, "Session restored (credential only, no profile)")
            }
            Self::LoggedOut => write!(f, "Logged out"),
            Self::Expired => write!(
                f,
                "Your session has expired due to inactivity. Please log in again."
            ),
        }
    }
}
