//! Integration tests for Cartwheel.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartwheel-integration-tests
//! ```
//!
//! Each test spawns the storefront in-process on an ephemeral port, backed by
//! an in-memory SQLite pool and an in-memory session store. Nothing outside
//! the test process is required.

use std::net::SocketAddr;
use std::path::PathBuf;

use cartwheel_storefront::config::{LogFormat, StorefrontConfig};
use cartwheel_storefront::state::AppState;
use cartwheel_storefront::{db, routes};
use reqwest::Client;
use tower_sessions::MemoryStore;

/// A running storefront and a client holding one shopper's cookies.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start a storefront and return a context for one shopper.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn new() -> Self {
        let pool = db::create_pool("sqlite::memory:")
            .await
            .expect("Failed to create database pool");

        let config = StorefrontConfig {
            database_url: "sqlite::memory:".to_string(),
            host: [127, 0, 0, 1].into(),
            port: 0,
            base_url: "http://localhost".to_string(),
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
            cart_retention_days: 1,
            log_format: LogFormat::Text,
        };

        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind to address");
        let addr: SocketAddr = listener.local_addr().expect("Failed to read local address");

        let app = routes::app(AppState::new(config, pool), MemoryStore::default());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            client: Self::shopper(),
            base_url: format!("http://{addr}"),
        }
    }

    /// A fresh client with its own cookie jar, i.e. a second shopper.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn shopper() -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Absolute URL for a path on the running storefront.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
