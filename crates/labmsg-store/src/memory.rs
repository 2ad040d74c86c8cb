//! In-memory message store, for tests and ephemeral runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::message::Message;
use crate::store::MessageStore;

/// Message store that keeps the collection in process memory.
///
/// Counts calls to `load` and `save` so callers can assert how many
/// store round-trips an operation performed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    messages: RwLock<Vec<Message>>,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `messages`.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: RwLock::new(messages),
            ..Self::default()
        }
    }

    /// Number of `load` calls so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn load(&self) -> StoreResult<Vec<Message>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.messages.read().await.clone())
    }

    async fn save(&self, messages: &[Message]) -> StoreResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.messages.write().await = messages.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_returns_a_detached_snapshot() {
        let store = MemoryStore::with_messages(vec![Message::new(1, "a")]);
        let mut snapshot = store.load().await.unwrap();
        snapshot.push(Message::new(2, "b"));

        assert_eq!(store.load().await.unwrap().len(), 1);
        assert_eq!(store.load_count(), 2);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn save_replaces_the_collection() {
        let store = MemoryStore::new();
        store.save(&[Message::new(3, "c")]).await.unwrap();
        assert_eq!(store.load().await.unwrap(), vec![Message::new(3, "c")]);
        assert_eq!(store.save_count(), 1);
    }
}
