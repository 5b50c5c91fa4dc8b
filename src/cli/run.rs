use std::io;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::api;
use crate::cli::Cli;
use crate::domain::{AppError, ContactManager};
use crate::storage::{self, StorageMediums};

/// Builds the store named by `cli`, then serves the HTTP API until Ctrl-C.
pub async fn run_app(cli: Cli) -> Result<(), AppError> {
    let medium = StorageMediums::from(&cli.storage_choice)?;
    let backend = storage::parse_storage_type(medium, &cli.json_path)?;
    let manager = Arc::new(ContactManager::new(backend)?);

    tracing::info!("Current storage choice is: {}", medium.is_which());
    if medium.is_json() {
        tracing::info!(path = %cli.json_path, "contacts persisted to file");
    }

    let listener = TcpListener::bind(cli.bind_addr()).await?;
    tracing::info!("Server running on port {}", cli.port);

    axum::serve(listener, api::router(manager))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    until_signal(tokio::signal::ctrl_c()).await
}

// A listener that fails to register never resolves.
async fn until_signal<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(err) = signal.await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Log filter from `RUST_LOG` directives, `info` when unset or unparsable.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn rust_log_level_is_honoured() {
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(
            log_filter(Some("contacts=loud")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[tokio::test]
    async fn failed_signal_listener_does_not_stop_server() {
        let failing = async { Err::<(), _>(io::Error::other("no signal handler")) };
        let waited =
            tokio::time::timeout(Duration::from_millis(50), until_signal(failing)).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn delivered_signal_resolves() {
        let delivered = async { Ok::<(), io::Error>(()) };
        let waited = tokio::time::timeout(Duration::from_secs(1), until_signal(delivered)).await;
        assert!(waited.is_ok());
    }
}
