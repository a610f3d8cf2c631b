use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AdminCommands {
    /// Client administration listing
    Clients,
    /// Project administration listing
    Projects,
}
