use std::fmt;

use serde::Serialize;

/// Where the current identity was obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// Returned by the login endpoint
    Login,
    /// Read back from durable storage
    Cache,
    /// Returned by the who-am-I endpoint
    Backend,
    /// Decoded from credential claims after HS256 signature verification
    VerifiedClaims,
    /// Decoded from credential claims without any signature check
    UnverifiedClaims,
}

impl IdentitySource {
    /// Unverified claims are trust-reduced data and must not be treated
    /// like a backend-confirmed identity.
    pub fn is_trusted(&self) -> bool {
        !matches!(self, Self::UnverifiedClaims)
    }
}

impl fmt::Display for IdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::Cache => "cache",
            Self::Backend => "backend",
            Self::VerifiedClaims => "verified claims",
            Self::UnverifiedClaims => "unverified claims",
        };
        f.write_str(name)
    }
}
