use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_INACTIVITY_TIMEOUT_SECS, DEFAULT_STORAGE_DIR,
    MAX_INACTIVITY_TIMEOUT_SECS, MIN_CLAIMS_SECRET_LENGTH, MIN_INACTIVITY_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds without user input before the session is logged out
    pub inactivity_timeout_secs: u64,
    /// Durable storage directory, relative to the config dir
    pub storage_dir: String,
    /// HS256 secret used to verify credential claims when set
    pub claims_secret: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_secs: DEFAULT_INACTIVITY_TIMEOUT_SECS,
            storage_dir: String::from(DEFAULT_STORAGE_DIR),
            claims_secret: None,
        }
    }
}

impl SessionConfig {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_INACTIVITY_TIMEOUT_SECS..=MAX_INACTIVITY_TIMEOUT_SECS)
            .contains(&self.inactivity_timeout_secs)
        {
            return Err(ConfigError::session(format!(
                "session.inactivity_timeout_secs must be {}-{}, got {}",
                MIN_INACTIVITY_TIMEOUT_SECS,
                MAX_INACTIVITY_TIMEOUT_SECS,
                self.inactivity_timeout_secs
            )));
        }

        let dir = std::path::Path::new(&self.storage_dir);
        if self.storage_dir.is_empty() || dir.is_absolute() || self.storage_dir.contains("..") {
            return Err(ConfigError::session(
                "session.storage_dir must be relative and cannot contain '..'",
            ));
        }

        if let Some(ref secret) = self.claims_secret
            && secret.len() < MIN_CLAIMS_SECRET_LENGTH
        {
            return Err(ConfigError::session(format!(
                "session.claims_secret must be at least {MIN_CLAIMS_SECRET_LENGTH} characters"
            )));
        }

        Ok(())
    }
}
