//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own database.

use super::constants::*;
use jobboard_server::{make_app, RequestsLoggingLevel, ServerConfig, SqliteBoardStore};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with an isolated database
///
/// When dropped, the server gracefully shuts down and the temp dir is removed.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Store for direct database access in tests
    pub store: Arc<SqliteBoardStore>,

    _temp_db_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be created, the port cannot be bound,
    /// or the server doesn't become ready within timeout.
    pub async fn spawn() -> Self {
        let temp_db_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(
            SqliteBoardStore::new(temp_db_dir.path().join("jobboard.db"))
                .expect("Failed to open board store"),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            static_dir: None,
        };
        let app = make_app(config, store.clone());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            store,
            _temp_db_dir: temp_db_dir,
            _shutdown_tx: Some(shutdown_tx),
        };
        server.wait_for_ready().await;
        server
    }

    /// Polls the status endpoint until the server answers
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/status", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => tokio::time::sleep(Duration::from_millis(10)).await,
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
