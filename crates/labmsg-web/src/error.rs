//! API error type and its mapping onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use labmsg_store::StoreError;

/// Errors a handler can answer with.
///
/// The display strings of the client-facing variants are part of the wire
/// contract and end up verbatim in the `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `message` field is missing, not a string, or blank.
    #[error("Empty message")]
    EmptyMessage,

    /// The path id is not a positive integer.
    #[error("Invalid id")]
    InvalidId,

    /// No message carries the requested id.
    #[error("Message not found")]
    NotFound,

    /// The largest stored id is `u64::MAX`; no higher id can be allocated.
    #[error("Id space exhausted")]
    IdsExhausted,

    /// The store failed in a way it could not repair.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyMessage | Self::InvalidId => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::IdsExhausted | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Store(e) => {
                tracing::error!(error = %e, "request failed on store i/o");
                "Internal server error".to_owned()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_their_status() {
        assert_eq!(ApiError::EmptyMessage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn exhausted_ids_are_internal() {
        assert_eq!(
            ApiError::IdsExhausted.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_are_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ApiError::from(StoreError::Io {
            path: "data/messages.json".into(),
            source: io,
        });
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
