use crate::admin_commands::AdminCommands;

use studio_session::Route;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Log in and keep the session for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the current session and identity
    Whoami,

    /// List clients
    Clients,

    /// List licenses
    Licenses,

    /// List projects
    Projects,

    /// Administration listings (admin role required)
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },

    /// Run commands read from stdin against one session, logging out
    /// after the inactivity window
    Shell,
}

impl Commands {
    /// Where the command sits in the navigation table.
    pub fn route(&self) -> Route {
        match self {
            Self::Login { .. } | Self::Logout | Self::Shell => Route::public(self.name()),
            Self::Whoami | Self::Clients | Self::Licenses | Self::Projects => {
                Route::authenticated(self.name())
            }
            Self::Admin { .. } => Route::admin(self.name()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Clients => "clients",
            Self::Licenses => "licenses",
            Self::Projects => "projects",
            Self::Admin {
                action: AdminCommands::Clients,
            } => "admin-clients",
            Self::Admin {
                action: AdminCommands::Projects,
            } => "admin-projects",
            Self::Shell => "shell",
        }
    }
}
