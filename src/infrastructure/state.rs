//! Shared application state

use std::sync::Arc;

use crate::application::ports::outbound::LlmPort;
use crate::application::services::{AdventureService, FallbackPolicy};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::openai::OpenAiClient;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// Generation backend; `None` when no credential is configured
    pub llm: Option<Arc<dyn LlmPort>>,
    pub fallback: FallbackPolicy,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let llm = config.openai_api_key.as_deref().map(|api_key| {
            let client = OpenAiClient::new(
                &config.openai_base_url,
                api_key,
                &config.openai_model,
                config.openai_timeout_secs,
            );
            Arc::new(client) as Arc<dyn LlmPort>
        });
        let fallback = FallbackPolicy::new(config.demo_fallback);

        Self {
            config,
            llm,
            fallback,
        }
    }

    /// Use a specific backend instead of the configured one
    #[cfg(test)]
    pub fn with_llm(mut self, llm: Option<Arc<dyn LlmPort>>) -> Self {
        self.llm = llm;
        self
    }

    /// Pipeline bound to the configured backend, if any
    pub fn adventure_service(&self) -> Option<AdventureService<Arc<dyn LlmPort>>> {
        let service = AdventureService::new(self.llm.clone()?);
        Some(match self.config.openai_temperature {
            Some(temperature) => service.with_temperature(temperature),
            None => service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_follows_credentials() {
        let state = AppState::new(AppConfig::default());
        assert!(state.llm.is_none());
        assert!(state.adventure_service().is_none());
        assert!(state.fallback.allow_demo);

        let config = AppConfig {
            openai_api_key: Some("sk-test".to_string()),
            demo_fallback: false,
            ..AppConfig::default()
        };
        let state = AppState::new(config);
        assert!(state.adventure_service().is_some());
        assert!(!state.fallback.allow_demo);
    }
}
