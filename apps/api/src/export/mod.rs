//! PDF export of the currently generated letter.
//!
//! Flow: take the session's letter text (lock held briefly) → wrap and
//! paginate → render in `spawn_blocking` → record the outcome on the session.

pub mod handlers;

use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::{paginate, render_pdf, wrap_text, PageConfig};
use crate::models::notification::Notification;
use crate::session::SessionStore;

const FILENAME_PREFIX: &str = "resignation-letter";
const FALLBACK_SLUG: &str = "document";
const DOCUMENT_TITLE: &str = "Resignation Letter";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Please generate a letter first before downloading.")]
    NothingToExport,

    #[error("Failed to render PDF: {0}")]
    Render(String),
}

impl ExportError {
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::NothingToExport => "NOTHING_TO_EXPORT",
            ExportError::Render(_) => "EXPORT_FAILURE",
        }
    }

    pub fn notification(&self) -> Notification {
        match self {
            ExportError::NothingToExport => Notification::destructive(
                "No Letter to Download",
                "Please generate a letter first before downloading.",
            ),
            ExportError::Render(_) => Notification::destructive(
                "Download Failed",
                "There was an error downloading your letter. Please try again.",
            ),
        }
    }
}

/// A finished PDF ready to hand to the browser.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Lowercases the name and collapses every whitespace run into one hyphen.
/// Leading and trailing whitespace is dropped first.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// `resignation-letter-<slug>.pdf`, or `resignation-letter-document.pdf`
/// when the name is empty.
pub fn letter_filename(full_name: &str) -> String {
    let slug = slugify(full_name);
    let slug = if slug.is_empty() { FALLBACK_SLUG } else { slug.as_str() };
    format!("{FILENAME_PREFIX}-{slug}.pdf")
}

/// Lays out and renders `text` into a paginated PDF. Synchronous and CPU-bound.
pub fn render_letter(
    text: &str,
    full_name: &str,
    config: &PageConfig,
) -> Result<ExportedDocument, ExportError> {
    if text.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let lines = wrap_text(text, config.chars_per_line());
    let pages = paginate(lines, config.lines_per_page());
    let bytes = render_pdf(DOCUMENT_TITLE, &pages, config)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    Ok(ExportedDocument {
        filename: letter_filename(full_name),
        bytes,
    })
}

/// Exports the session's current letter. Produces no document when there is
/// nothing to export or rendering fails.
pub async fn export_letter(
    sessions: &SessionStore,
    session_id: Uuid,
    config: &PageConfig,
) -> Result<ExportedDocument, AppError> {
    let pending = sessions
        .update(session_id, |session| session.begin_export())
        .await?;

    let config = config.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        render_letter(&pending.text, &pending.full_name, &config)
    })
    .await
    .unwrap_or_else(|e| Err(ExportError::Render(format!("render task failed: {e}"))));

    match &rendered {
        Ok(document) => info!(
            "Exported {} ({} bytes) for session {session_id}",
            document.filename,
            document.bytes.len()
        ),
        Err(e) => error!("Export failed for session {session_id}: {e}"),
    }

    sessions
        .update(session_id, |session| {
            session.finish_export(rendered.as_ref().map(|_| ()));
            Ok(())
        })
        .await?;

    rendered.map_err(AppError::from)
}
