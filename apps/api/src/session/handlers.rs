use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resignation::{Credential, FormPatch};
use crate::session::SessionSnapshot;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequest {
    pub api_key: Credential,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterFormat {
    #[default]
    Json,
    Html,
}

#[derive(Deserialize)]
pub struct LetterQuery {
    #[serde(default)]
    pub format: LetterFormat,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionSnapshot>) {
    (StatusCode::CREATED, Json(state.sessions.create().await))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.snapshot(session_id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {session_id} not found")))
    }
}

/// PATCH /api/v1/sessions/:id/form
pub async fn handle_update_form(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(patch): Json<FormPatch>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = state
        .sessions
        .update(session_id, |session| {
            session.apply_patch(patch);
            Ok(session.snapshot())
        })
        .await?;
    Ok(Json(snapshot))
}

/// PUT /api/v1/sessions/:id/credential
///
/// The key is kept in memory for this session only and never echoed back.
pub async fn handle_set_credential(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<CredentialRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = state
        .sessions
        .update(session_id, |session| {
            session.set_credential(request.api_key);
            Ok(session.snapshot())
        })
        .await?;
    Ok(Json(snapshot))
}

/// GET /api/v1/sessions/:id/letter[?format=html]
pub async fn handle_get_letter(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<LetterQuery>,
) -> Result<Response, AppError> {
    let view = state.sessions.read(session_id, |s| s.view()).await?;
    Ok(match query.format {
        LetterFormat::Json => Json(view).into_response(),
        LetterFormat::Html => Html(view.to_html()).into_response(),
    })
}
