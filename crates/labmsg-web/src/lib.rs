//! HTTP interface for the labmsg message service.
//!
//! This crate exposes a small CRUD API over the message collection kept by
//! `labmsg-store`:
//!
//! - `GET /` identity probe answering `Lab 1`.
//! - `GET|POST /msg` to list and create messages.
//! - `GET|PUT|DELETE /msg/{id}` to read, update and delete one message.

pub mod api;
pub mod error;
pub mod server;
pub mod state;

use std::path::PathBuf;

pub use error::ApiError;
pub use server::{WebServer, router};
pub use state::AppState;

/// Environment variable holding the listen port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable holding the bind address.
pub const ENV_BIND: &str = "LABMSG_BIND";
/// Environment variable holding the data directory.
pub const ENV_DATA_DIR: &str = "LABMSG_DATA_DIR";

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// The address to bind the HTTP server to.
    pub bind_addr: String,
    /// The port to listen on.
    pub port: u16,
    /// Directory holding `messages.json`.
    pub data_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".into(),
            port: 3000,
            data_dir: PathBuf::from(labmsg_store::DEFAULT_DATA_DIR),
        }
    }
}

impl WebConfig {
    /// Build a configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup, falling
    /// back to the defaults for anything unset or unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_PORT) {
            match raw.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    default = config.port,
                    "ignoring invalid PORT"
                ),
            }
        }
        if let Some(bind) = lookup(ENV_BIND).filter(|s| !s.trim().is_empty()) {
            config.bind_addr = bind.trim().to_owned();
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|s| !s.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        config
    }

    /// Return the `host:port` string this configuration binds to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
