//! authgate server binary.
//!
//! Loads configuration from the environment, wires the client directory,
//! session lookup and grant stage, and serves HTTP with graceful shutdown.

use anyhow::Result;
use authgate::{
    config::Config,
    http::{AppState, ForwardingGrantStage, build_router},
    storage::{create_storage, parse_storage_backend},
};
use std::{env, sync::Arc};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "authgate=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();

    let version = authgate::config::version()?;

    if env::args().any(|arg| arg == "--version") {
        println!("{version}");
        return Ok(());
    }

    tracing::info!(?version, "Starting authgate");

    let config = Config::new()?;
    tracing::info!(external_base = %config.external_base, "Configuration loaded");

    let storage_backend =
        parse_storage_backend(&config.storage_backend, config.database_url.as_deref())?;
    tracing::info!(backend = %config.storage_backend, "Initializing storage");
    let (client_store, session_store) = create_storage(storage_backend).await?;

    if !*config.enable_client_api.as_ref() {
        tracing::info!("Client self-registration is disabled");
    }

    let grant_path: &str = config.grant_stage_path.as_ref();
    let grant_stage = Arc::new(ForwardingGrantStage::new(grant_path));
    let app_context = AppState::new(
        Arc::new(config.clone()),
        client_store,
        session_store,
        grant_stage,
    );

    let app = build_router(app_context);

    // Setup graceful shutdown
    let tracker = TaskTracker::new();
    let token = CancellationToken::new();

    {
        let tracker = tracker.clone();
        let inner_token = token.clone();

        let ctrl_c = async {
            if let Err(err) = signal::ctrl_c().await {
                tracing::error!("failed to install Ctrl+C handler: {}", err);
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
                    tracing::error!("failed to install signal handler: {}", err);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::spawn(async move {
            tokio::select! {
                () = inner_token.cancelled() => { },
                _ = terminate => {},
                _ = ctrl_c => {},
            }

            tracker.close();
            inner_token.cancel();
        });
    }

    let bind_address = format!("0.0.0.0:{}", config.http_port.as_ref());
    let listener = TcpListener::bind(&bind_address).await?;

    {
        let inner_token = token.clone();
        tracker.spawn(async move {
            tracing::info!("Starting server on {bind_address}");

            let shutdown_token = inner_token.clone();
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_token.cancelled().await;
                    tracing::info!("axum graceful shutdown complete");
                })
                .await;
            if let Err(err) = result {
                tracing::error!("axum task failed: {}", err);
            }

            inner_token.cancel();
        });
    }

    tracker.wait().await;

    Ok(())
}
