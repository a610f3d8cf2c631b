use crate::{Identity, Roles};

use serde_json::{Map, Value};

const NAME_IDENTIFIER_URI: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";
const EMAIL_URI: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";
const NAME_URI: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
const ROLE_URI: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

// Earlier keys win
const ID_KEYS: &[&str] = &["jti", "sub", "nameid", "userId", "id", NAME_IDENTIFIER_URI];
const EMAIL_KEYS: &[&str] = &["sub", "email", EMAIL_URI];
const NAME_KEYS: &[&str] = &["name", "fullName", NAME_URI, "unique_name", "given_name"];
const ROLE_KEYS: &[&str] = &["roles", "role", ROLE_URI];

/// Raw credential claims. Claim naming varies between issuers, so the
/// payload is kept as a JSON object and read through known key lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Expiration timestamp (Unix seconds), when present.
    pub fn expires_at(&self) -> Option<i64> {
        self.0.get("exp").and_then(Value::as_i64)
    }

    /// Best-effort identity from known claim keys. Returns None when the
    /// claims carry nothing identifying at all.
    pub fn to_identity(&self) -> Option<Identity> {
        let id = self.first_string(ID_KEYS).unwrap_or_default();

        let email = self.first_string(EMAIL_KEYS).unwrap_or_default();

        let full_name = self.first_string(NAME_KEYS).unwrap_or_default();

        let roles = ROLE_KEYS
            .iter()
            .filter_map(|key| self.0.get(*key))
            .map(Roles::from_value)
            .find(|roles| !roles.is_empty())
            .unwrap_or_default();

        if id.is_empty() && email.is_empty() && full_name.is_empty() && roles.is_empty() {
            return None;
        }

        Some(Identity {
            id,
            email,
            full_name,
            roles,
        })
    }

    fn first_string(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(|value| match value {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}
