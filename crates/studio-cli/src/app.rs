use crate::admin_commands::AdminCommands;
use crate::commands::Commands;
use crate::error::{CliError, Result as CliResult};

use studio_auth::LoginCredentials;
use studio_client::Client;
use studio_config::Config;
use studio_session::{
    FileStorage, Navigation, RedirectReason, RouteGuard, SessionError, SessionManager,
    SessionSettings,
};

use std::sync::Arc;
use std::time::Duration;

use log::info;
use serde_json::{Value, json};

/// One session plus the guard every command passes through.
pub struct App {
    session: SessionManager,
    guard: RouteGuard,
}

impl App {
    pub fn new(session: SessionManager) -> Self {
        Self {
            guard: RouteGuard::new(session.clone()),
            session,
        }
    }

    /// Wire transport, file storage and session from configuration.
    /// `server` overrides the configured base URL.
    pub fn from_config(config: &Config, server: Option<&str>) -> CliResult<Self> {
        let base_url = match server {
            Some(url) => url.to_string(),
            None => config.api.resolved_base_url()?,
        };
        info!("Using backend {base_url}");

        let client = Client::with_timeout(&base_url, Duration::from_secs(config.api.timeout_secs))?;
        let storage = FileStorage::open(&config.storage_path()?)?;

        Ok(Self::new(SessionManager::new(
            client,
            Arc::new(storage),
            SessionSettings::from(&config.session),
        )))
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Run one command once the guard lets it through.
    pub async fn execute(&self, command: &Commands) -> CliResult<Value> {
        if let Navigation::Redirect { to, reason } = self.guard.check(&command.route()).await {
            if reason == RedirectReason::NotAuthenticated && self.session.snapshot().expired {
                return Err(SessionError::session_expired().into());
            }
            return Err(CliError::redirected(command.name(), to, &reason));
        }

        let value = match command {
            Commands::Login { email, password } => {
                let identity = self
                    .session
                    .login(&LoginCredentials::new(email, password))
                    .await?;
                serde_json::to_value(identity)?
            }
            Commands::Logout => {
                let was_authenticated = self.session.is_authenticated();
                self.session.logout();
                json!({ "loggedOut": was_authenticated })
            }
            Commands::Whoami => serde_json::to_value(self.session.snapshot())?,
            Commands::Clients
            | Commands::Admin {
                action: AdminCommands::Clients,
            } => serde_json::to_value(self.session.client().list_clients().await?)?,
            Commands::Licenses => self.session.client().list_licenses().await?,
            Commands::Projects
            | Commands::Admin {
                action: AdminCommands::Projects,
            } => self.session.client().list_projects().await?,
            Commands::Shell => {
                return Err(CliError::Unsupported {
                    command: command.name().to_string(),
                });
            }
        };

        Ok(value)
    }
}

/// JSON for stdout.
pub fn render(value: &Value, pretty: bool) -> CliResult<String> {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    Ok(output?)
}
