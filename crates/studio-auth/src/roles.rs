use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// A user's roles. Original case is kept for display; every comparison is
/// case-insensitive. Always a collection, even when the backend sends a
/// single role as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Roles(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RolesRepr {
    Many(Vec<String>),
    One(String),
}

impl<'de> Deserialize<'de> for Roles {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let roles = match Option::<RolesRepr>::deserialize(deserializer)? {
            Some(RolesRepr::Many(roles)) => roles,
            Some(RolesRepr::One(role)) => vec![role],
            None => Vec::new(),
        };
        Ok(Roles::new(roles))
    }
}

impl Roles {
    /// Blank entries are dropped; surrounding whitespace is trimmed.
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            roles
                .into_iter()
                .map(Into::into)
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
        )
    }

    /// Lenient conversion from a raw JSON claim: a string, or an array whose
    /// string (or numeric) members are kept.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(role) => Roles::new([role.as_str()]),
            Value::Array(items) => Roles::new(items.iter().filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })),
            _ => Roles::default(),
        }
    }

    pub fn contains(&self, role: &str) -> bool {
        let wanted = role.to_lowercase();
        self.0.iter().any(|r| r.to_lowercase() == wanted)
    }

    /// Lowercase form of every role, for comparisons.
    pub fn normalized(&self) -> Vec<String> {
        self.0.iter().map(|r| r.to_lowercase()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Roles {
    fn from(roles: Vec<String>) -> Self {
        Roles::new(roles)
    }
}
