//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::AppSettings;

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::{info, warn};

use issue_tracker::Trace;
#[cfg(debug_assertions)]
use issue_tracker::doc::ApiDoc;
use issue_tracker::domain::IssueService;
use issue_tracker::inbound::http::health::{HealthState, live, ready};
use issue_tracker::inbound::http::issues;
use issue_tracker::inbound::http::state::HttpState;
use issue_tracker::outbound::persistence::{DieselIssueRepository, InMemoryIssueRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the issue service to PostgreSQL when a pool is configured, otherwise
/// to the in-memory store.
fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("issue store: postgres");
            let service = Arc::new(IssueService::new(
                Arc::new(DieselIssueRepository::new(pool.clone())),
                clock,
            ));
            HttpState::new(service.clone(), service)
        }
        None => {
            info!("issue store: in-memory");
            let service = Arc::new(IssueService::new(
                Arc::new(InMemoryIssueRepository::new()),
                clock,
            ));
            HttpState::new(service.clone(), service)
        }
    };
    web::Data::new(state)
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(issues::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and mark the service ready.
///
/// Signal handling is left to the caller; see [`shutdown_signal`] and
/// [`drain`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .disable_signals()
    .bind(config.bind_addr())?;

    for addr in server.addrs() {
        info!(bind_addr = %addr, "issue tracker listening");
    }
    let server = server.run();
    health_state.mark_ready();
    Ok(server)
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
///
/// # Errors
/// Returns [`std::io::Error`] when the signal handlers cannot be installed.
pub async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Fail liveness, keep serving for `grace`, then stop gracefully.
pub async fn drain(health_state: web::Data<HealthState>, handle: ServerHandle, grace: Duration) {
    health_state.mark_unhealthy();
    warn!(grace_ms = grace.as_millis(), "shutdown requested; draining");
    tokio::time::sleep(grace).await;
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use rstest::rstest;

    use super::*;

    fn loopback() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }

    #[rstest]
    #[actix_web::test]
    async fn create_server_marks_ready_and_alive() {
        let health_state = web::Data::new(HealthState::new());
        let server =
            create_server(health_state.clone(), ServerConfig::new(loopback())).expect("bind");

        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        assert!(health_state.is_ready());
        assert!(health_state.is_alive());
        handle.stop(false).await;
        running.await.expect("server task").expect("server stops cleanly");
    }

    #[rstest]
    #[actix_web::test]
    async fn drain_fails_liveness_while_still_serving() {
        let health_state = web::Data::new(HealthState::new());
        let server =
            create_server(health_state.clone(), ServerConfig::new(loopback())).expect("bind");
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        let draining = actix_web::rt::spawn(drain(
            health_state.clone(),
            handle,
            Duration::from_millis(300),
        ));
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!health_state.is_alive(), "liveness fails as soon as draining starts");
        assert!(!running.is_finished(), "server keeps serving during the grace period");

        draining.await.expect("drain task");
        running
            .await
            .expect("server task")
            .expect("server stops cleanly");
    }
}
