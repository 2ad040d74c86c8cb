//! REST API route handlers.
//!
//! Each handler validates its inputs before touching the store, then
//! loads a fresh snapshot, applies its change to a local copy and writes
//! the whole collection back. Nothing coordinates concurrent requests:
//! two overlapping mutations both start from the same snapshot and the
//! later save wins.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use labmsg_store::{Message, message, next_id, parse_id};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of the identity probe at `/`.
pub const IDENTITY: &str = "Lab 1";

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Extract the trimmed `message` field from a raw request body.
///
/// A body that is absent, not JSON, or not an object counts as a body
/// without the field.
pub fn message_text(body: &[u8]) -> Result<String, ApiError> {
    let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    match value.get("message").and_then(Value::as_str).map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_owned()),
        _ => Err(ApiError::EmptyMessage),
    }
}

fn message_id(raw: &str) -> Result<u64, ApiError> {
    parse_id(raw).ok_or(ApiError::InvalidId)
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub async fn identity() -> &'static str {
    IDENTITY
}

// ---------------------------------------------------------------------------
// /msg collection
// ---------------------------------------------------------------------------

/// GET /msg — List all messages in stored order.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state.store.load().await?;
    Ok(Json(messages))
}

/// POST /msg — Create a message with the next free id.
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let text = message_text(&body)?;

    let mut messages = state.store.load().await?;
    let id = next_id(&messages).ok_or(ApiError::IdsExhausted)?;
    let created = Message::new(id, text);
    messages.push(created.clone());
    state.store.save(&messages).await?;

    tracing::info!(id = created.id, "message created");
    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------------------
// /msg/{id}
// ---------------------------------------------------------------------------

/// GET /msg/{id} — Fetch one message.
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let id = message_id(&raw_id)?;

    let messages = state.store.load().await?;
    message::find(&messages, id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// PUT /msg/{id} — Replace the text of one message.
///
/// The id is checked before the body, so a request with both wrong gets
/// "Invalid id".
pub async fn update_message(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Message>, ApiError> {
    let id = message_id(&raw_id)?;
    let text = message_text(&body)?;

    let mut messages = state.store.load().await?;
    let idx = message::position(&messages, id).ok_or(ApiError::NotFound)?;
    messages[idx].message = text;
    let updated = messages[idx].clone();
    state.store.save(&messages).await?;

    tracing::info!(id, "message updated");
    Ok(Json(updated))
}

/// DELETE /msg/{id} — Remove a message.
///
/// Every record carrying the id goes, in case an edited store file holds
/// duplicates.
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = message_id(&raw_id)?;

    let mut messages = state.store.load().await?;
    if message::find(&messages, id).is_none() {
        return Err(ApiError::NotFound);
    }
    messages.retain(|m| m.id != id);
    state.store.save(&messages).await?;

    tracing::info!(id, "message deleted");
    Ok(Json(json!({ "message": "Deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use labmsg_store::{MemoryStore, MessageStore};

    use super::*;

    fn state_with(messages: Vec<Message>) -> (Arc<MemoryStore>, State<Arc<AppState>>) {
        let store = Arc::new(MemoryStore::with_messages(messages));
        let state = Arc::new(AppState::new(store.clone()));
        (store, State(state))
    }

    fn body(value: Value) -> Bytes {
        Bytes::from(value.to_string())
    }

    #[test]
    fn message_text_trims_and_rejects_blank() {
        assert_eq!(
            message_text(br#"{"message": "  Nuevo mensaje  "}"#).unwrap(),
            "Nuevo mensaje"
        );
        let rejected: [&[u8]; 8] = [
            br#"{"message": ""}"#,
            br#"{"message": "   "}"#,
            br#"{"message": 123}"#,
            br#"{"message": null}"#,
            br#"{}"#,
            br#"["message"]"#,
            b"not json",
            b"",
        ];
        for raw in rejected {
            assert!(matches!(message_text(raw), Err(ApiError::EmptyMessage)));
        }
    }

    #[tokio::test]
    async fn create_allocates_after_the_maximum_id() {
        let (store, state) = state_with(vec![Message::new(2, "m1"), Message::new(5, "m2")]);

        let (status, Json(created)) = create_message(state, body(json!({"message": " x "})))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created, Message::new(6, "x"));
        assert_eq!(store.load_count(), 1);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn invalid_create_never_touches_the_store() {
        let (store, state) = state_with(Vec::new());

        let err = create_message(state, body(json!({"message": "  "})))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::EmptyMessage));
        assert_eq!(store.load_count(), 0);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn update_checks_id_before_message() {
        let (store, state) = state_with(vec![Message::new(1, "a")]);

        let err = update_message(state, Path("0".into()), body(json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InvalidId));
        assert_eq!(store.load_count(), 0);
    }

    #[tokio::test]
    async fn update_of_missing_id_loads_but_does_not_save() {
        let (store, state) = state_with(vec![Message::new(1, "a")]);

        let err = update_message(state, Path("9".into()), body(json!({"message": "b"})))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(store.load_count(), 1);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn update_replaces_text_and_keeps_id() {
        let (store, state) = state_with(vec![Message::new(1, "a"), Message::new(3, "b")]);

        let Json(updated) = update_message(state, Path("3".into()), body(json!({"message": "c"})))
            .await
            .unwrap();

        assert_eq!(updated, Message::new(3, "c"));
        assert_eq!(
            store.load().await.unwrap(),
            vec![Message::new(1, "a"), Message::new(3, "c")]
        );
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let (store, state) = state_with(vec![Message::new(1, "a"), Message::new(2, "b")]);

        let Json(reply) = delete_message(state.clone(), Path("1".into())).await.unwrap();
        assert_eq!(reply, json!({"message": "Deleted successfully"}));
        assert_eq!(store.load().await.unwrap(), vec![Message::new(2, "b")]);

        let err = get_message(state, Path("1".into())).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_every_duplicate_of_the_id() {
        let (store, state) = state_with(vec![
            Message::new(4, "first"),
            Message::new(1, "keep"),
            Message::new(4, "second"),
        ]);

        delete_message(state.clone(), Path("4".into())).await.unwrap();

        assert_eq!(store.load().await.unwrap(), vec![Message::new(1, "keep")]);
        let err = get_message(state, Path("4".into())).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn create_fails_cleanly_when_ids_are_exhausted() {
        let (store, state) = state_with(vec![Message::new(u64::MAX, "last")]);

        let err = create_message(state, body(json!({"message": "one more"})))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::IdsExhausted));
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.load().await.unwrap(), vec![Message::new(u64::MAX, "last")]);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused_while_a_larger_one_exists() {
        let (_store, state) = state_with(vec![Message::new(1, "a"), Message::new(2, "b")]);

        delete_message(state.clone(), Path("1".into())).await.unwrap();
        let (_, Json(created)) = create_message(state, body(json!({"message": "c"})))
            .await
            .unwrap();

        assert_eq!(created.id, 3);
    }
}
