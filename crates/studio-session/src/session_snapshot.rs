use crate::{SessionError, SessionPhase, SessionResult};

use studio_auth::{Identity, IdentitySource};

use serde::Serialize;

/// Read-only view of the session at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub is_user: bool,
    pub identity: Option<Identity>,
    pub identity_source: Option<IdentitySource>,
    pub loading: bool,
    pub last_error: Option<String>,
    pub restored: bool,
    pub expired: bool,
}

impl SessionSnapshot {
    pub fn has_role(&self, role: &str) -> bool {
        self.identity.as_ref().is_some_and(|i| i.has_role(role))
    }

    /// The identity, or why there is none.
    pub fn require_identity(&self) -> SessionResult<&Identity> {
        if !self.is_authenticated {
            return Err(if self.expired {
                SessionError::session_expired()
            } else {
                SessionError::not_authenticated()
            });
        }

        self.identity
            .as_ref()
            .ok_or_else(SessionError::identity_unavailable)
    }
}
