use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::generation::GenerationError;
use crate::models::notification::Notification;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// The session already has the same operation in flight.
    #[error("Busy: {0}")]
    Busy(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, notification): (_, _, _, Option<Notification>) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Busy(msg) => (StatusCode::CONFLICT, "BUSY", msg.clone(), None),
            AppError::Generation(e) => {
                let status = if e.is_validation() {
                    StatusCode::BAD_REQUEST
                } else {
                    tracing::error!("Generation error: {e}");
                    StatusCode::BAD_GATEWAY
                };
                (status, e.code(), e.to_string(), Some(e.notification()))
            }
            AppError::Export(e) => {
                let status = match e {
                    ExportError::NothingToExport => StatusCode::CONFLICT,
                    ExportError::Render(_) => {
                        tracing::error!("Export error: {e}");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, e.code(), e.to_string(), Some(e.notification()))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });
        if let Some(notification) = notification {
            body["notification"] = json!(notification);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_credential_is_bad_request_with_notification() {
        let (status, body) = render(GenerationError::MissingCredential.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_CREDENTIAL");
        assert_eq!(body["notification"]["title"], "API Key Required");
        assert_eq!(body["notification"]["kind"], "destructive");
    }

    #[tokio::test]
    async fn test_rejected_request_is_bad_gateway_with_status_in_message() {
        let (status, body) =
            render(GenerationError::RequestRejected { status: 401 }.into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "REQUEST_REJECTED");
        assert_eq!(body["error"]["message"], "API request failed: 401");
    }

    #[tokio::test]
    async fn test_nothing_to_export_is_conflict() {
        let (status, body) = render(ExportError::NothingToExport.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["notification"]["title"], "No Letter to Download");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = render(anyhow::anyhow!("secret detail").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "An internal server error occurred");
        assert!(body.get("notification").is_none());
    }
}
