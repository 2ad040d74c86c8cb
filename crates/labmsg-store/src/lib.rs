//! # labmsg-store
//!
//! Persistence for the labmsg message service.
//!
//! The whole collection of messages is kept as one JSON array and
//! rewritten on every mutation. Handlers talk to it through the
//! [`MessageStore`] trait so the file-backed store can be swapped for
//! the in-memory one in tests.
//!
//! ```ignore
//! use labmsg_store::{JsonFileStore, MessageStore, next_id, Message};
//!
//! let store = JsonFileStore::new("data");
//! let mut messages = store.load().await?;
//! let id = next_id(&messages).expect("id space exhausted");
//! messages.push(Message::new(id, "hello"));
//! store.save(&messages).await?;
//! ```

pub mod error;
pub mod ids;
pub mod json_file;
pub mod memory;
pub mod message;
pub mod store;

// ── re-exports ───────────────────────────────────────────────────────

pub use error::{StoreError, StoreResult};
pub use ids::{next_id, parse_id};
pub use json_file::{DATA_FILE_NAME, DEFAULT_DATA_DIR, JsonFileStore};
pub use memory::MemoryStore;
pub use message::Message;
pub use store::MessageStore;
