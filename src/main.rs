//! Alumnos API - REST service for student records
//!
//! Binary entry point: loads configuration, wires the repository and serves
//! the router until a shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alumnos_api::{
    api::create_router,
    config::StoreBackend,
    docs, AppState, Config, InMemoryStudentRepository, MySqlStudentRepository, StudentRepository,
};

/// Main entry point for the student records server.
///
/// # Startup Sequence
/// 1. Load `.env` if present and initialize tracing
/// 2. Load configuration from environment variables
/// 3. Create the repository for the configured backend
/// 4. Load the base API-description document
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alumnos_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Alumnos API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, backend={:?}, store={:?}, upload_dir={}",
        config.server_port,
        config.backend,
        config.store,
        config.upload_dir.display()
    );

    let mysql = match config.backend {
        StoreBackend::MySql => Some(MySqlStudentRepository::new(&config.store)),
        StoreBackend::Memory => None,
    };
    let repo: Arc<dyn StudentRepository> = match &mysql {
        Some(repo) => Arc::new(repo.clone()),
        None => Arc::new(InMemoryStudentRepository::new()),
    };

    let options = docs::load_options(&config.options_path).with_context(|| {
        format!(
            "failed to load API options from {}",
            config.options_path.display()
        )
    })?;

    let state = AppState::new(repo)
        .with_upload_dir(config.upload_dir.clone())
        .with_options(options);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(repo) = mysql {
        repo.close().await;
        info!("Store connections closed");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
