//! Service entry-point: wires configuration, the lending-core adapter, and
//! the HTTP server.

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use lending_desk::inbound::http::health::HealthState;
use lending_desk::outbound::lending::LendingHttpBackend;
use lending_desk::server::{DeskSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DeskSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load configuration: {err}")))?;
    let backend = LendingHttpBackend::new(settings.core_url()?, settings.core_timeout())
        .map_err(|err| std::io::Error::other(format!("failed to build core client: {err}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(settings.bind_addr()?, Arc::new(backend)),
    )?;
    server.await
}
