//! Issue tracker entry-point: loads settings, prepares the issue store, and
//! serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use issue_tracker::inbound::http::health::HealthState;
use issue_tracker::outbound::persistence::{DbPool, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server, drain, shutdown_signal};

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

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(|err| {
        std::io::Error::other(format!("invalid ISSUES_BIND_ADDR: {err}"))
    })?;

    let mut config = ServerConfig::new(bind_addr);
    match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url).await.map_err(std::io::Error::other)?;
            let pool = DbPool::new(settings.pool_config(url))
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("ISSUES_DATABASE_URL not set; issues will not survive a restart"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;

    let handle = server.handle();
    let grace = settings.drain_grace();
    actix_web::rt::spawn(async move {
        match shutdown_signal().await {
            Ok(()) => drain(health_state, handle, grace).await,
            Err(err) => warn!(error = %err, "shutdown signal handler unavailable"),
        }
    });

    let outcome = server.await;
    info!("issue tracker stopped");
    outcome
}
