//! Shared application state for the web server.
//!
//! [`AppState`] is wrapped in an `Arc` and handed to every handler. It
//! carries the injected message store; no collection data is cached here,
//! each request reads a fresh snapshot from the store.

use std::sync::Arc;

use labmsg_store::MessageStore;

/// Shared state accessible from every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// Backing store for the message collection.
    pub store: Arc<dyn MessageStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }
}
