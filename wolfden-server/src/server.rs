//! Binding and running the HTTP server.

use std::future::Future;
use std::net::IpAddr;

use tokio::net::TcpListener;
use tracing::{error, info};
use wolfden_core::DocumentStore;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::net;
use crate::routes::build_router;
use crate::state::AppState;

/// Binds `config.bind_addr()` and serves the API and static files until
/// `shutdown` resolves.
///
/// A port that cannot be bound is not an error: the diagnostic goes to stderr
/// and the log, and `Ok(false)` is returned without serving. `Ok(true)` means
/// the server ran and shut down cleanly.
pub async fn serve<F>(
    config: &ServerConfig,
    store: DocumentStore,
    shutdown: F,
) -> ServerResult<bool>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = match TcpListener::bind(config.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Cannot start server on port {}: {}", config.port, e);
            error!(port = config.port, error = %e, "Cannot start server on port {}", config.port);
            return Ok(false);
        }
    };

    let lan_ip = net::lan_ip().await;
    print_banner(config, lan_ip);
    info!(addr = %config.bind_addr(), lan_ip = %lan_ip, "Server listening");

    let app = build_router(AppState::new(store), config);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    println!("\nServer stopped.");
    info!("Shut down cleanly");
    Ok(true)
}

fn print_banner(config: &ServerConfig, lan_ip: IpAddr) {
    let rule = "=".repeat(40);
    println!("{rule}");
    println!("  Werewolf game server is running!");
    println!("{rule}");
    println!("\nEntry page: {}", config.entry_path().display());
    println!("\nOn this machine:   http://localhost:{}", config.port);
    println!("On the LAN:        http://{}:{}", lan_ip, config.port);
    println!("\nPress Ctrl+C to stop the server");
    println!("{rule}");
}
