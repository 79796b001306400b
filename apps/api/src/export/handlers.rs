//! Axum route handlers for the Export API.

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::export_letter;
use crate::state::AppState;

/// POST /api/v1/sessions/:id/export
///
/// Returns the letter as `application/pdf` with an attachment filename
/// derived from the full name.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let document = export_letter(&state.sessions, session_id, &state.page_config).await?;

    let disposition = HeaderValue::from_str(&content_disposition(&document.filename))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid Content-Disposition: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(document.bytes),
    )
        .into_response())
}

/// Header values must be visible ASCII; anything else in the name becomes `_`.
fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_plain_ascii() {
        assert_eq!(
            content_disposition("resignation-letter-alex-chen.pdf"),
            "attachment; filename=\"resignation-letter-alex-chen.pdf\""
        );
    }

    #[test]
    fn test_content_disposition_replaces_unsafe_chars() {
        assert_eq!(
            content_disposition("resignation-letter-zoë-\"x\".pdf"),
            "attachment; filename=\"resignation-letter-zo_-_x_.pdf\""
        );
        assert!(HeaderValue::from_str(&content_disposition("名前.pdf")).is_ok());
    }
}
