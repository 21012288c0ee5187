use crate::app_container::Application;
use crate::configuration::Settings;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use shared_kernel::tracing::{config_telemetry, shutdown_global_tracer_provider};
use tracing_actix_web::TracingLogger;

mod app_container;
mod configuration;
mod errors;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config_telemetry("geo_locations_http_server");

    let settings = Settings::parse()?;
    let app = web::Data::new(Application::from_settings(&settings).await?);
    let address = settings.application.address();
    tracing::info!(
        "Starting server on {}:{} with the {:?} backend",
        address.0,
        address.1,
        settings.storage.backend
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(routes::config)
            .app_data(app.clone())
    })
    .bind(address)
    .context("Failed to bind the server address")?
    .run()
    .await
    .context("Server failed to run")?;

    shutdown_global_tracer_provider();
    Ok(())
}
