use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wolfden_core::DocumentStore;
use wolfden_server::config::{install_dir, ServerConfig};
use wolfden_server::{serve, ServerError, ServerResult};

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("wolfden_server=info,wolfden_core=info,tower_http=info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        error!(error = %e, "Server terminated with an error");
        std::process::exit(1);
    }
}

async fn run() -> ServerResult<()> {
    info!("Initializing wolfden server...");

    let root = install_dir().map_err(|e| {
        ServerError::Internal(format!("Cannot locate install directory: {}", e))
    })?;
    std::env::set_current_dir(&root).map_err(|e| {
        ServerError::Internal(format!("Cannot change directory to {:?}: {}", root, e))
    })?;
    info!(root = ?root, "Using install directory as data root");

    let store = DocumentStore::new(&root);
    store.ensure_layout().await?;

    let document = store.load_config().await;
    let config = ServerConfig::from_document(&document, &root);

    // A port that cannot be bound is reported by `serve` and is not a failure exit.
    serve(&config, store, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>(); // On non-Unix, just wait for Ctrl+C

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        },
    }
}
