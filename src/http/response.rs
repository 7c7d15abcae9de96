//! Error responses.
//!
//! Every error leaves the API as `{"error": <code>, "message": <text>}` with a
//! status chosen from the underlying failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::LedgerError;

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Missing or invalid bearer token")]
    Unauthorized,
}

impl ApiError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Ledger(LedgerError::UnknownParty(_)) => (StatusCode::BAD_REQUEST, "unknown_party"),
            ApiError::Ledger(LedgerError::NotaryNotFound) => {
                (StatusCode::SERVICE_UNAVAILABLE, "notary_unavailable")
            }
            ApiError::Ledger(LedgerError::AmbiguousNotary(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ambiguous_notary")
            }
            ApiError::Ledger(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ledger_error"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        } else {
            tracing::warn!(error = %self, code, "Request rejected");
        }
        json_error(status, code, self.to_string())
    }
}

/// Build a JSON error response.
pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: code.to_string(),
            message: message.into(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(LedgerError::UnknownParty("X".into())), StatusCode::BAD_REQUEST),
            (ApiError::from(LedgerError::NotaryNotFound), StatusCode::SERVICE_UNAVAILABLE),
            (ApiError::from(LedgerError::AmbiguousNotary(2)), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::from(LedgerError::Key("bad".into())), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_and_code().0, status);
        }
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::from(LedgerError::UnknownParty("NodeZ".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
