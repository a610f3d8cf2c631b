use studio_config::SessionConfig;

use std::time::Duration;

const DEFAULT_INACTIVITY_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub inactivity_timeout: Duration,
    /// Verify credential claims with this HS256 secret; None decodes them
    /// unverified
    pub claims_secret: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            inactivity_timeout: DEFAULT_INACTIVITY_TIMEOUT,
            claims_secret: None,
        }
    }
}

impl From<&SessionConfig> for SessionSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            inactivity_timeout: config.inactivity_timeout(),
            claims_secret: config.claims_secret.clone(),
        }
    }
}
