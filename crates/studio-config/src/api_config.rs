use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_API_TIMEOUT_SECS, DEFAULT_LOCAL_URL, Deployment,
    MAX_API_TIMEOUT_SECS, MIN_API_TIMEOUT_SECS,
};

use serde::Deserialize;

/// Backend API location and request settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Explicit base URL; wins over the deployment-derived one
    pub base_url: Option<String>,
    pub deployment: Deployment,
    pub local_url: String,
    pub hosted_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            deployment: Deployment::default(),
            local_url: String::from(DEFAULT_LOCAL_URL),
            hosted_url: None,
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Resolve the base URL: explicit `base_url` > deployment context.
    pub fn resolved_base_url(&self) -> ConfigErrorResult<String> {
        let url = match (&self.base_url, self.deployment) {
            (Some(url), _) => url.clone(),
            (None, Deployment::Local) => self.local_url.clone(),
            (None, Deployment::Hosted) => self.hosted_url.clone().ok_or_else(|| {
                ConfigError::api("api.hosted_url must be set when api.deployment = \"hosted\"")
            })?,
        };

        Ok(url.trim_end_matches('/').to_string())
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        let url = self.resolved_base_url()?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::api(format!(
                "api base URL must start with http:// or https://, got {url}"
            )));
        }

        if !(MIN_API_TIMEOUT_SECS..=MAX_API_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::api(format!(
                "api.timeout_secs must be {}-{}, got {}",
                MIN_API_TIMEOUT_SECS, MAX_API_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }
}
