//! User Directory Server binary.

use directory_server::{config::Config, create_app, create_state, init_tracing};
use notes_client::HttpNotesClient;
use tokio::{net::TcpListener, signal};
use tracing::info;
use user_store::{SqliteUserStore, seed_default_users};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        notes_url = %config.notes_url(),
        "Starting User Directory Server"
    );

    // Nothing is served if the user store cannot be opened or seeded.
    let store = SqliteUserStore::open(&config.database_path).await?;
    seed_default_users(&store).await?;

    let notes = HttpNotesClient::new(&config.notes_url(), config.notes_timeout())?;

    let state = create_state(config.clone(), store, notes);
    let app = create_app(state);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!(addr = %config.server_addr(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
