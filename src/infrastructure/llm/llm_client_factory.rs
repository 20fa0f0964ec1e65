use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::{GeminiClient, OpenAiClient};

pub struct LlmClientFactory;

#[derive(Debug, thiserror::Error)]
pub enum LlmClientFactoryError {
    #[error("client initialization failed: {0}")]
    InitializationFailed(#[from] LlmClientError),
}

impl LlmClientFactory {
    /// Builds the configured completion client. A missing or blank API key
    /// yields `None`: the service starts with AI actions disabled.
    pub fn create(
        settings: &LlmSettings,
    ) -> Result<Option<Arc<dyn LlmClient>>, LlmClientFactoryError> {
        let Some(api_key) = settings
            .api_key
            .as_ref()
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
            .map(String::from)
        else {
            tracing::warn!(
                provider = ?settings.provider,
                "No AI API key configured, AI actions disabled"
            );
            return Ok(None);
        };

        let timeout = Duration::from_secs(settings.request_timeout_secs);
        let model = settings.model.clone();
        let base_url = settings.base_url.clone();

        let client: Arc<dyn LlmClient> = match settings.provider {
            LlmProvider::Gemini => {
                tracing::info!(model = %model, "Using Gemini completion model");
                Arc::new(GeminiClient::new(api_key, model, base_url, timeout)?)
            }
            LlmProvider::OpenAi => {
                tracing::info!(model = %model, "Using OpenAI-compatible completion model");
                Arc::new(OpenAiClient::new(api_key, model, base_url, timeout)?)
            }
        };

        Ok(Some(client))
    }
}
