// src/bin/api_server.rs

use song_library::infra::{database, enrichment, logging};
use song_library::transport;
use song_library::{AppConfig, PostgresSongRepository, SongService};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// How long in-flight requests may run after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    logging::init_logging(&config.log_level)?;

    // --- Storage ---
    info!("connecting to database");
    let pool = database::connect(&config.database).await?;
    let repository = Arc::new(PostgresSongRepository::new(pool.clone()));

    // --- Enrichment ---
    let enricher = enrichment::build_enricher(&config.enrichment)?;
    info!(mode = ?config.enrichment, "metadata provider configured");

    let app_state = transport::http::AppState::new(SongService::new(repository, enricher));

    // --- API Server ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "server started");
    info!("swagger UI available at http://localhost:{}/swagger-ui", config.port);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            joined??;
            return Ok(());
        }
        _ = shutdown_signal() => {
            info!("server shutting down");
        }
    }

    let _ = stop_tx.send(());
    match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
        Ok(joined) => {
            if let Err(e) = joined? {
                error!(error = %e, "server error during shutdown");
            }
        }
        Err(_) => {
            warn!(grace_secs = SHUTDOWN_GRACE.as_secs(), "server forced to shutdown");
            server.abort();
        }
    }

    pool.close().await;
    info!("server shutdown");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
