use studio_auth::lenient_string;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Label shown for a client with no license attached.
pub const NO_LICENSE_NAME: &str = "Sin licencia";

/// One entry of `GET /api/clients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub client_code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub balance_usd: Option<f64>,
    /// Missing or null becomes a license named [`NO_LICENSE_NAME`]
    #[serde(default, deserialize_with = "license_or_default")]
    pub license: License,
    #[serde(default)]
    pub acquired_at: Option<String>,
    #[serde(default)]
    pub active_license: Option<Value>,
    #[serde(default)]
    pub project_name: Option<String>,
}

/// The license attached to a client. Fields beyond `name` are kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Default for License {
    fn default() -> Self {
        Self {
            name: String::from(NO_LICENSE_NAME),
            details: Map::new(),
        }
    }
}

impl License {
    pub fn is_unlicensed(&self) -> bool {
        self.name == NO_LICENSE_NAME && self.details.is_empty()
    }
}

fn license_or_default<'de, D>(deserializer: D) -> Result<License, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<License>::deserialize(deserializer)?.unwrap_or_default())
}
