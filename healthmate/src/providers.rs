//! Endpoint construction from assistant configuration.

use std::sync::Arc;
use std::time::Duration;

use crate::{FitnessConfig, ModelProvider, ProviderError};

/// Chat completions run longer than the lookup tools, so they get their own bound.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(90);

pub fn build_provider(config: &FitnessConfig) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    build_provider_with_timeout(config, DEFAULT_PROVIDER_TIMEOUT)
}

#[cfg(feature = "provider-openai")]
pub fn build_provider_with_timeout(
    config: &FitnessConfig,
    timeout: Duration,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let provider = hprovider::adapters::openai::OpenAiProvider::from_api_key(
        config.openai_api_key.clone(),
        config.openai_base_url.as_deref(),
        timeout,
    )?;

    Ok(Arc::new(provider))
}

#[cfg(not(feature = "provider-openai"))]
pub fn build_provider_with_timeout(
    _config: &FitnessConfig,
    _timeout: Duration,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-openai feature is not enabled on healthmate",
    ))
}
