//! Application configuration

use std::env;

use anyhow::{Context, Result};

use crate::infrastructure::openai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API credential; generation falls back to demo content without it
    pub openai_api_key: Option<String>,
    /// Model used for every generation stage
    pub openai_model: String,
    /// Responses API base URL
    pub openai_base_url: String,
    /// Per-request timeout
    pub openai_timeout_secs: u64,
    /// Sampling temperature; provider default when unset
    pub openai_temperature: Option<f32>,

    /// Serve demo content when no credential is set or the quota is exhausted
    pub demo_fallback: bool,

    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_timeout_secs: env::var("OPENAI_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .context("OPENAI_TIMEOUT_SECS must be a whole number of seconds")?,
            openai_temperature: env::var("OPENAI_TEMPERATURE")
                .ok()
                .map(|value| value.parse::<f32>())
                .transpose()
                .context("OPENAI_TEMPERATURE must be a number")?,

            demo_fallback: parse_bool(
                &env::var("DEMO_FALLBACK").unwrap_or_else(|_| "true".to_string()),
            )
            .context("DEMO_FALLBACK must be true or false")?,

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_timeout_secs: 120,
            openai_temperature: None,
            demo_fallback: true,
            server_port: 3000,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized boolean {:?}", other),
    }
}
