//! Letter Generation — orchestrates one generation attempt for a session.
//!
//! Flow: validate → build prompt → mark loading → Gemini call → record result.
//!
//! The session lock is held only for the bookkeeping steps. It is released
//! across the Gemini call so snapshots keep answering (and report `Loading`)
//! while the request is in flight.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::prompts::build_letter_prompt;
use crate::generation::validator::validate;
use crate::generation::GenerationError;
use crate::llm_client::LetterGenerator;
use crate::models::notification::Notification;
use crate::render::LetterView;
use crate::session::SessionStore;

/// Successful generation: the populated letter pane plus the success toast.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub letter: LetterView,
    pub notification: Notification,
}

/// Runs a single generation attempt. Exactly one outbound call is made when
/// validation passes and none when it fails. Nothing is retried.
pub async fn generate_letter(
    sessions: &SessionStore,
    session_id: Uuid,
    generator: &dyn LetterGenerator,
) -> Result<GenerationOutcome, AppError> {
    // Step 1: validate and enter the loading state under the lock
    let pending = sessions
        .update(session_id, |session| {
            // A busy session keeps its in-flight state untouched.
            session.ensure_not_generating()?;
            let prompt = match validate(session.form(), session.credential()) {
                Ok(validated) => build_letter_prompt(&validated),
                Err(e) => {
                    warn!("Generation rejected for session {session_id}: {}", e.code());
                    session.fail_generation(&e);
                    return Err(e.into());
                }
            };
            session.begin_generation(prompt)
        })
        .await?;

    info!("Generating letter for session {session_id}");

    // Step 2: the single outbound call, lock released
    let result = generator
        .generate(&pending.prompt, &pending.credential)
        .await
        .map_err(GenerationError::from);

    // Step 3: record the outcome
    sessions
        .update(session_id, |session| match result {
            Ok(text) => {
                info!(
                    "Letter generated for session {session_id} ({} chars)",
                    text.len()
                );
                let notification = session.complete_generation(text);
                Ok(GenerationOutcome {
                    letter: session.view(),
                    notification,
                })
            }
            Err(e) => {
                warn!("Generation failed for session {session_id}: {e}");
                session.fail_generation(&e);
                Err(e.into())
            }
        })
        .await
}
