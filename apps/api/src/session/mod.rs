//! Session state — the single mutable holder for one browser session.
//!
//! Flow: the form is edited field-by-field, the credential is set once, and the
//! generation and export workflows move the session through its loading and
//! result states. Nothing here talks to the network; the workflows in
//! `generation` and `export` do that with the session lock released.

pub mod handlers;
pub mod store;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::ExportError;
use crate::generation::GenerationError;
use crate::models::notification::Notification;
use crate::models::resignation::{Credential, FormPatch, ResignationRequest};
use crate::render::LetterView;

pub use store::SessionStore;

/// Everything one user has entered or produced in a single sitting.
///
/// `letter` is the current generation result: `None` until the first success,
/// replaced whole by each new attempt, never partially written.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    form: ResignationRequest,
    credential: Credential,
    letter: Option<String>,
    is_loading: bool,
    is_exporting: bool,
    error: Option<String>,
    last_notification: Option<Notification>,
    created_at: DateTime<Utc>,
    /// Refreshed on every store access; drives idle eviction.
    last_seen: Instant,
}

/// Read-only view of a session returned to the browser. Never includes the credential.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub form: ResignationRequest,
    pub has_credential: bool,
    pub letter: LetterView,
    pub is_loading: bool,
    pub is_exporting: bool,
    pub error: Option<String>,
    pub last_notification: Option<Notification>,
    pub created_at: DateTime<Utc>,
}

/// What the generation workflow needs once the lock is released.
#[derive(Debug, Clone)]
pub struct PendingGeneration {
    pub prompt: String,
    pub credential: Credential,
}

/// What the export workflow needs once the lock is released.
#[derive(Debug, Clone)]
pub struct PendingExport {
    pub text: String,
    pub full_name: String,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            form: ResignationRequest::default(),
            credential: Credential::default(),
            letter: None,
            is_loading: false,
            is_exporting: false,
            error: None,
            last_notification: None,
            created_at: Utc::now(),
            last_seen: Instant::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn form(&self) -> &ResignationRequest {
        &self.form
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    #[cfg(test)]
    pub fn letter(&self) -> Option<&str> {
        self.letter.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a generation or export is in flight.
    pub fn is_busy(&self) -> bool {
        self.is_loading() || self.is_exporting
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_seen)
    }

    pub fn apply_patch(&mut self, patch: FormPatch) {
        self.form.apply(patch);
    }

    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = credential;
    }

    pub fn view(&self) -> LetterView {
        LetterView::from_state(self.is_loading, self.letter.as_deref())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            form: self.form.clone(),
            has_credential: !self.credential.is_blank(),
            letter: self.view(),
            is_loading: self.is_loading,
            is_exporting: self.is_exporting,
            error: self.error.clone(),
            last_notification: self.last_notification.clone(),
            created_at: self.created_at,
        }
    }

    // ── Generation ─────────────────────────────────────────────────────────

    pub fn ensure_not_generating(&self) -> Result<(), AppError> {
        if self.is_loading {
            return Err(AppError::Busy(
                "A letter is already being generated for this session".to_string(),
            ));
        }
        Ok(())
    }

    /// Enters the loading state for a new attempt.
    ///
    /// The previous letter is dropped here: the loading view supersedes it and
    /// a failed attempt lands on the empty state rather than the stale text.
    pub fn begin_generation(&mut self, prompt: String) -> Result<PendingGeneration, AppError> {
        self.ensure_not_generating()?;
        self.is_loading = true;
        self.error = None;
        self.letter = None;
        Ok(PendingGeneration {
            prompt,
            credential: self.credential.clone(),
        })
    }

    pub fn complete_generation(&mut self, text: String) -> Notification {
        self.is_loading = false;
        self.letter = Some(text);
        let notification = Notification::letter_generated();
        self.last_notification = Some(notification.clone());
        notification
    }

    /// Records a generation failure. Validation failures happen before
    /// `begin_generation`, so they leave any existing letter in place.
    pub fn fail_generation(&mut self, error: &GenerationError) {
        self.is_loading = false;
        self.error = Some(error.to_string());
        self.last_notification = Some(error.notification());
    }

    // ── Export ─────────────────────────────────────────────────────────────

    pub fn begin_export(&mut self) -> Result<PendingExport, AppError> {
        if self.is_exporting {
            return Err(AppError::Busy(
                "A PDF export is already running for this session".to_string(),
            ));
        }
        let Some(text) = self.letter.clone() else {
            let error = ExportError::NothingToExport;
            self.last_notification = Some(error.notification());
            return Err(error.into());
        };
        self.is_exporting = true;
        Ok(PendingExport {
            text,
            full_name: self.form.full_name.clone(),
        })
    }

    pub fn finish_export(&mut self, outcome: Result<(), &ExportError>) {
        self.is_exporting = false;
        self.last_notification = Some(match outcome {
            Ok(()) => Notification::pdf_downloaded(),
            Err(error) => error.notification(),
        });
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
