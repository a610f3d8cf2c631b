mod api_config;
mod config;
mod deployment;
mod error;
mod log_level;
mod logging_config;
mod session_config;

#[cfg(test)]
mod tests;

pub use api_config::ApiConfig;
pub use config::Config;
pub use deployment::Deployment;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use session_config::SessionConfig;

pub const CONFIG_DIR_ENV: &str = "STUDIO_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = ".studio";
pub const CONFIG_FILENAME: &str = "config.toml";

// Api
const DEFAULT_LOCAL_URL: &str = "http://localhost:5147";
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
const MIN_API_TIMEOUT_SECS: u64 = 1;
const MAX_API_TIMEOUT_SECS: u64 = 300;

// Session
const DEFAULT_INACTIVITY_TIMEOUT_SECS: u64 = 300;
const MIN_INACTIVITY_TIMEOUT_SECS: u64 = 1;
const MAX_INACTIVITY_TIMEOUT_SECS: u64 = 86_400;
const DEFAULT_STORAGE_DIR: &str = "session";
const MIN_CLAIMS_SECRET_LENGTH: usize = 32;

// Logging
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
