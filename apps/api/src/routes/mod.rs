pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session state
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/form", patch(session::handle_update_form))
        .route(
            "/api/v1/sessions/:id/credential",
            put(session::handle_set_credential),
        )
        .route("/api/v1/sessions/:id/letter", get(session::handle_get_letter))
        // Generation and export
        .route(
            "/api/v1/sessions/:id/generate",
            post(generation::handle_generate),
        )
        .route("/api/v1/sessions/:id/export", post(export::handle_export))
        .with_state(state)
}
