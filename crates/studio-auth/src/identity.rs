use crate::{ROLE_ADMIN, ROLE_USER, Roles};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The user profile associated with a credential.
///
/// Serialized in camelCase, which is both the backend's who-am-I shape and
/// the format cached in durable storage. On input, a singular `role` key is
/// read when `roles` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "IdentityRepr")]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub roles: Roles,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityRepr {
    #[serde(default, deserialize_with = "lenient_string")]
    id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    full_name: String,
    #[serde(default)]
    roles: Option<Roles>,
    #[serde(default)]
    role: Option<Roles>,
}

impl From<IdentityRepr> for Identity {
    fn from(repr: IdentityRepr) -> Self {
        Self {
            id: repr.id,
            email: repr.email,
            full_name: repr.full_name,
            roles: repr.roles.or(repr.role).unwrap_or_default(),
        }
    }
}

impl Identity {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    pub fn is_user(&self) -> bool {
        self.has_role(ROLE_USER)
    }

    /// Name to show in a UI: full name, else email, else id.
    pub fn display_name(&self) -> &str {
        [&self.full_name, &self.email, &self.id]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Accepts strings, numbers and null (as empty) so numeric user ids survive.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}
