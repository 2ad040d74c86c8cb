//! The storage seam between request handlers and persistence.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::message::Message;

/// Whole-collection persistence for messages.
///
/// Every call works on a full snapshot: `load` returns the entire
/// collection and `save` replaces it. Implementations hold no state that
/// callers can observe between a `load` and the following `save`, so a
/// read-modify-write sequence is last-write-wins when requests overlap.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Return the current collection, creating an empty one if needed.
    async fn load(&self) -> StoreResult<Vec<Message>>;

    /// Replace the stored collection with `messages`.
    async fn save(&self, messages: &[Message]) -> StoreResult<()>;
}
