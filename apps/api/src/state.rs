use std::sync::Arc;

use crate::layout::{default_page_config, PageConfig};
use crate::llm_client::LetterGenerator;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Gemini in production; swapped for an in-process double in tests.
    pub generator: Arc<dyn LetterGenerator>,
    /// US letter, portrait, 1" margins, 11pt monospace.
    pub page_config: PageConfig,
}

impl AppState {
    pub fn new(generator: Arc<dyn LetterGenerator>) -> Self {
        Self {
            sessions: SessionStore::new(),
            generator,
            page_config: default_page_config(),
        }
    }
}
