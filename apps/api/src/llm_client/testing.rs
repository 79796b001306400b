//! In-process `LetterGenerator` doubles for workflow and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{LetterGenerator, LlmError};
use crate::models::resignation::Credential;

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Rejected(u16),
    Empty,
}

/// Answers every call with the same reply and records what it was asked.
pub struct ScriptedGenerator {
    reply: Reply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    keys: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            keys: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(Reply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    pub fn last_key(&self) -> Option<String> {
        self.keys.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LetterGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, credential: &Credential) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.keys.lock().unwrap().push(credential.expose().to_string());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Rejected(status) => Err(LlmError::RequestRejected { status: *status }),
            Reply::Empty => Err(LlmError::EmptyResponse),
        }
    }
}

/// Holds each call open until the test releases it, so the in-flight state
/// can be observed.
pub struct GatedGenerator {
    pub entered: Notify,
    pub release: Notify,
    text: String,
}

impl GatedGenerator {
    pub fn new(text: &str) -> Self {
        Self {
            entered: Notify::new(),
            release: Notify::new(),
            text: text.to_string(),
        }
    }
}

#[async_trait]
impl LetterGenerator for GatedGenerator {
    async fn generate(&self, _prompt: &str, _credential: &Credential) -> Result<String, LlmError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.text.clone())
    }
}
