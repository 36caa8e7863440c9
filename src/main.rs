use std::net::SocketAddr;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use imei_intake::config::{env_or, Config};
use imei_intake::state::AppState;
use imei_intake::submission::metadata;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init tracing before config so config file warnings are visible
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(env_or("IMEI_LOG_LEVEL", "info"))
        }))
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting IMEI intake");
    if config.forwarding_enabled() {
        tracing::info!(
            "Forwarding submissions to webhook at {}",
            metadata::redacted_host(&config.webhook_url)
        );
    } else {
        tracing::info!(
            "No webhook configured, appending submissions to {}",
            config.data_path.display()
        );
    }

    let addr = SocketAddr::new(config.host, config.port);
    let state = AppState::new(config)?;
    let app = imei_intake::build_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
