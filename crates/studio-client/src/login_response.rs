use studio_auth::{Identity, Roles, lenient_string};

use serde::Deserialize;
use serde_json::Value;

/// Body of a successful `POST /api/auth/login`. Null fields read as empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub token: String,
    #[serde(default)]
    pub user_id: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(default)]
    pub roles: Roles,
}

impl LoginResponse {
    /// Split into the credential and the identity it belongs to.
    pub fn into_parts(self) -> (String, Identity) {
        let id = match self.user_id {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };

        let identity = Identity {
            id,
            email: self.email,
            full_name: self.full_name,
            roles: self.roles,
        };

        (self.token, identity)
    }
}
