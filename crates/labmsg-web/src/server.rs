//! Main web server setup and startup.
//!
//! [`WebServer`] composes the Axum router, registers all routes, and starts
//! the HTTP listener. [`router`] is exposed separately so tests can serve
//! the same routes on an ephemeral port with a store of their choosing.

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use labmsg_store::{JsonFileStore, MessageStore};

use crate::WebConfig;
use crate::api;
use crate::state::AppState;

/// The labmsg web server.
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a server persisting to the JSON file under `config.data_dir`.
    pub fn new(config: WebConfig) -> Self {
        let store = Arc::new(JsonFileStore::new(config.data_dir.clone()));
        Self::with_store(config, store)
    }

    /// Create a server over an already constructed store.
    pub fn with_store(config: WebConfig, store: Arc<dyn MessageStore>) -> Self {
        let state = Arc::new(AppState::new(store));
        Self { config, state }
    }

    /// Return the `host:port` string this server will bind to.
    pub fn addr(&self) -> String {
        self.config.addr()
    }

    /// Start the server and block until it is shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot be bound.
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr();
        let router = router(Arc::clone(&self.state));

        tracing::info!(
            addr = %addr,
            data_dir = %self.config.data_dir.display(),
            "starting web server"
        );

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

/// Build the Axum router with all routes registered.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::identity))
        .route("/msg", get(api::list_messages).post(api::create_message))
        .route(
            "/msg/{id}",
            get(api::get_message)
                .put(api::update_message)
                .delete(api::delete_message),
        )
        .layer(cors)
        .with_state(state)
}
