//! User directory entry-point: loads settings, selects the user store and
//! serves the REST API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_directory::inbound::http::health::HealthState;
use user_directory::settings::AppSettings;

mod server;

use server::{ServerConfig, build_user_repository, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let repository = build_user_repository(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings.host(), settings.port(), repository);
    let server = create_server(health_state.clone(), config)?;
    info!(host = settings.host(), port = settings.port(), "user directory listening");

    let handle = server.handle();
    let shutdown_health = health_state.clone();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown_health.mark_unhealthy();
            handle.stop(true).await;
        }
    });

    server.await
}

#[cfg(test)]
mod tests;
