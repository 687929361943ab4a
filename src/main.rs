//! Session Store - In-process session storage server
//!
//! Hosts a session engine behind a small JSON API and sweeps idle sessions
//! in the background.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use session_store::api::create_router;
use session_store::{spawn_gc_task, AppState, Config, ProviderRegistry};

/// Main entry point for the session store server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the provider registry and create the configured engine
/// 4. Start background session GC task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_store=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Session Store Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: provider={}, session_ttl={}s, gc_interval={}s, port={}",
        config.provider, config.session_ttl, config.gc_interval, config.server_port
    );

    let registry: ProviderRegistry = ProviderRegistry::with_defaults();
    let sessions = registry
        .create(&config.provider)
        .with_context(|| format!("available providers: {:?}", registry.names()))?;

    let gc_handle = spawn_gc_task(sessions.clone(), config.gc_period(), config.ttl());
    info!("Background session GC task started");

    let state = AppState::new(sessions, config.provider.clone(), config.ttl());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(gc_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the GC task and allows graceful shutdown.
async fn shutdown_signal(gc_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
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

    gc_handle.abort();
    warn!("Session GC task aborted");
}
