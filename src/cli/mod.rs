use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

mod migrate;
mod seed;
mod server;

#[derive(Debug, Error)]
#[error("The command exited with an error")]
pub struct CliError;

/// Command line options for Quill.
#[derive(Debug, Parser)]
#[command(about = "Utility suite for the Quill blog backend", version, author)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self.subcommand {
            Subcommand::Server(args) => server::run(args).change_context(CliError),
            Subcommand::Migrate(args) => migrate::run(args).change_context(CliError),
            Subcommand::Seed(args) => seed::run(args).change_context(CliError),
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    /// Expose the Quill HTTP API server
    Server(server::ServerCommand),
    /// Run pending database migrations
    Migrate(migrate::MigrateCommand),
    /// Insert the demo users and posts
    Seed(seed::SeedCommand),
}
