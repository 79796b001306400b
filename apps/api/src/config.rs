use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::llm_client::GEMINI_API_URL;

const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Application configuration loaded from environment variables.
///
/// The Gemini credential is deliberately absent: it is supplied per session
/// by the browser and never read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Generation endpoint. Defaults to the public Gemini `generateContent` URL.
    pub gemini_api_url: String,
    /// Idle time after which a session, and the key it holds, is discarded.
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_ttl_secs = std::env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_SESSION_TTL_SECS.to_string())
            .parse::<u64>()
            .context("SESSION_TTL_SECS must be a whole number of seconds")?;
        ensure!(session_ttl_secs > 0, "SESSION_TTL_SECS must be greater than zero");

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            gemini_api_url: optional_env("GEMINI_API_URL")
                .unwrap_or_else(|| GEMINI_API_URL.to_string()),
            session_ttl: Duration::from_secs(session_ttl_secs),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
