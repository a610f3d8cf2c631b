//! studio - admin client for the licensing backend
//!
//! # Examples
//!
//! ```bash
//! studio login --email admin@example.com --password secret
//! studio whoami --pretty
//! studio clients
//! studio admin projects
//! studio logout
//! ```

use studio_cli::{App, Cli, CliResult, Commands, logger, render, shell};
use studio_config::Config;

use std::process::ExitCode;

use clap::Parser;
use log::debug;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;
    config.log_summary();

    let app = App::from_config(&config, cli.server.as_deref())?;

    // Commands are dispatched only against a settled session
    let snapshot = app.session().restore_session().await;
    debug!(
        "Session restored: authenticated={}, source={:?}",
        snapshot.is_authenticated, snapshot.identity_source
    );

    match cli.command {
        Commands::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            shell::run(&app, stdin, cli.pretty, &mut std::io::stdout()).await
        }
        command => {
            let value = app.execute(&command).await?;
            println!("{}", render(&value, cli.pretty)?);
            Ok(())
        }
    }
}
