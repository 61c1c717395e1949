//! Provider construction from configuration.

use crate::config::{ProviderKind, ProviderSettings};
use crate::error::{CliError, Result};
use std::time::Duration;
use tally_domain::LlmProvider;
use tally_llm::{ollama, openrouter, LlmError, OllamaProvider, OpenRouterProvider};
use tracing::debug;

/// A provider chosen at runtime.
pub type DynProvider = Box<dyn LlmProvider<Error = LlmError>>;

/// Model used with Ollama when none is configured.
pub const DEFAULT_OLLAMA_MODEL: &str = "gemma2:9b";

/// Build the configured provider.
///
/// `api_key` is only read for OpenRouter.
pub fn build_provider(settings: &ProviderSettings, api_key: Option<String>) -> Result<DynProvider> {
    match settings.kind {
        ProviderKind::OpenRouter => {
            let api_key = api_key.ok_or_else(|| {
                CliError::Config(format!("{} is not set", settings.api_key_env))
            })?;
            let model = settings.model.clone().ok_or_else(|| {
                CliError::Config("no model configured (set --model or OPENROUTER_MODEL)".into())
            })?;
            let url = settings
                .endpoint
                .clone()
                .unwrap_or_else(|| openrouter::DEFAULT_API_URL.to_string());

            debug!("Using OpenRouter at {} with model {}", url, model);
            let mut provider = OpenRouterProvider::new(url, api_key, model)?
                .with_max_retries(settings.max_retries);
            if let Some(secs) = settings.timeout_secs {
                provider = provider.with_timeout(Duration::from_secs(secs))?;
            }
            Ok(Box::new(provider))
        }
        ProviderKind::Ollama => {
            let endpoint = settings
                .endpoint
                .clone()
                .unwrap_or_else(|| ollama::DEFAULT_ENDPOINT.to_string());
            let model = settings
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string());

            debug!("Using Ollama at {} with model {}", endpoint, model);
            let mut provider =
                OllamaProvider::new(endpoint, model)?.with_max_retries(settings.max_retries);
            if let Some(secs) = settings.timeout_secs {
                provider = provider.with_timeout(Duration::from_secs(secs))?;
            }
            Ok(Box::new(provider))
        }
    }
}
