//! studio - admin client for the licensing backend
//!
//! Every command is checked against the session before it runs: `login` and
//! `logout` are open, listings need a session and the `admin` listings need
//! the admin role. Sessions persist between invocations under the config
//! directory.

pub mod admin_commands;
pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod shell;

#[cfg(test)]
mod tests;

pub use admin_commands::AdminCommands;
pub use app::{App, render};
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
