//! Axum route handlers for the Generation API.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{generate_letter, GenerationOutcome};
use crate::state::AppState;

/// POST /api/v1/sessions/:id/generate
///
/// Validates the session's form and credential, calls Gemini once, and
/// returns the populated letter view with a success notification. Failures
/// come back as error bodies carrying the destructive notification.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GenerationOutcome>, AppError> {
    let outcome = generate_letter(&state.sessions, session_id, state.generator.as_ref()).await?;
    Ok(Json(outcome))
}
