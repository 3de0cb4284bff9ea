//! PeopleGraph Server entry point.

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use peoplegraph_server::config::Config;
use peoplegraph_server::{AppState, router};
use peoplegraph_service::ServiceState;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let service = match ServiceState::connect(&config.service_config()).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize graph store");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        store = service.sessions().backend(),
        "PeopleGraph Server starting",
    );

    let state = AppState::new(service, config.cors_origins.clone());
    let app = router(state);

    let addr = match config.host.parse() {
        Ok(ip) => SocketAddr::new(ip, config.port),
        Err(e) => {
            tracing::error!(host = %config.host, error = %e, "invalid bind host");
            return ExitCode::FAILURE;
        }
    };
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%addr, "PeopleGraph Server ready");

    if let Err(e) = peoplegraph_http::serve(listener, app, shutdown_signal()).await {
        tracing::error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("PeopleGraph Server shut down");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install signal handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
