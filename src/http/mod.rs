use actix_web::{middleware::ErrorHandlers, web, HttpServer};
use error_stack::{Result, ResultExt};
use thiserror::Error as ThisError;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::{config, App};

pub mod controllers;
pub mod error;
pub mod jwt;
pub mod util;

pub use error::Error;
pub use jwt::Jwt;

#[derive(Debug, ThisError)]
#[error("Failed to start the HTTP server")]
pub struct StartServerError;

/// Connects the pools and serves the API until the process is told
/// to stop.
pub async fn run(config: config::Server) -> Result<(), StartServerError> {
    let app = App::new(config).await.change_context(StartServerError)?;
    let addr = (app.config.ip, app.config.port);
    let workers = app.config.workers;

    info!("Listening on http://{}:{}", addr.0, addr.1);
    HttpServer::new(move || {
        actix_web::App::new()
            .app_data(web::Data::new(app.clone()))
            .wrap(TracingLogger::<util::QuieterRootSpanBuilder>::new())
            .wrap(ErrorHandlers::new().default_handler(util::handle_actix_web_error))
            .configure(controllers::configure)
    })
    .workers(workers)
    .bind(addr)
    .change_context(StartServerError)
    .attach_printable("could not bind to the configured address")?
    .run()
    .await
    .change_context(StartServerError)
}
