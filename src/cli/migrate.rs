use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

use quill::{config, database, util::telemetry};

#[derive(Debug, Error)]
#[error("Failed to run database migrations")]
pub struct MigrateError;

/// Run pending database migrations
#[derive(Debug, Parser)]
pub struct MigrateCommand {}

pub fn run(_args: MigrateCommand) -> Result<(), MigrateError> {
    dotenvy::dotenv().ok();

    let config = config::Server::load().change_context(MigrateError)?;
    telemetry::init();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .change_context(MigrateError)
        .attach_printable("could not build tokio runtime")?
        .block_on(async {
            let pool = database::Pool::new(&config.db, &config.db.primary)
                .await
                .change_context(MigrateError)?;

            pool.run_pending_migrations()
                .await
                .change_context(MigrateError)
        })
}
