use crate::commands::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "studio")]
#[command(about = "Studio admin client: sessions, clients, licenses and projects")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides api.base_url and the deployment context)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
