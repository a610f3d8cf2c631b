use studio_client::ClientError;
use studio_config::ConfigError;
use studio_session::{RedirectReason, SessionError, StorageError};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request failed: {0}")]
    Client(#[from] ClientError),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("'{command}' is not available: {reason} (redirected to {to})")]
    Redirected {
        command: String,
        to: String,
        reason: String,
    },

    #[error("'{command}' cannot run here")]
    Unsupported { command: String },

    #[error("Failed to initialize logger: {message}")]
    Logger { message: String },

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn redirected(command: &str, to: String, reason: &RedirectReason) -> Self {
        let reason = match reason {
            RedirectReason::NotAuthenticated => "not logged in".to_string(),
            RedirectReason::MissingRole(role) => format!("requires the {role} role"),
        };

        Self::Redirected {
            command: command.to_string(),
            to,
            reason,
        }
    }

    /// What the user can do about it, when there is something.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Session(e) => Some(e.recovery_hint()),
            Self::Redirected { .. } => Some("Run `studio login --email <email> --password <password>`."),
            Self::Client(e) if e.is_unauthorized() => {
                Some("The backend rejected the credential. Log out and back in.")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
