use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Where the backend the client talks to is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    #[default]
    Local,
    Hosted,
}

impl FromStr for Deployment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "localhost" | "development" => Ok(Deployment::Local),
            "hosted" | "production" => Ok(Deployment::Hosted),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deployment::Local => write!(f, "local"),
            Deployment::Hosted => write!(f, "hosted"),
        }
    }
}
