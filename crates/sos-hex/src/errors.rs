use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sos_types::domain::validate::ValidationError;
use sos_types::ports::order_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Rejected input: failed business-rule validation or a malformed
    /// identifier. Distinct from not-found so clients can tell "bad request"
    /// from "doesn't exist".
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest(e.0)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(anyhow::Error::new(e))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, msg) = match &self {
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            // Fixed wire text; the detail stays in the log.
            AppError::NotFound(detail) => {
                tracing::debug!(%detail, "not found");
                (StatusCode::NOT_FOUND, "Not found".into())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
            }
        };

        let body = serde_json::to_string(&ErrorBody { error: msg })
            .unwrap_or_else(|_| "{\"error\":\"internal serialization\"}".into());
        (code, [("content-type", "application/json")], body).into_response()
    }
}
