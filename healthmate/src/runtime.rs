//! Assistant wiring: endpoint, fitness tools, observability and persona.

use std::sync::Arc;

use hfitness::{FitnessError, SYSTEM_PROMPT, fitness_registry};
use hobserve::{
    MetricsObservabilityHooks, SafeSessionHooks, SafeToolHooks, TracingObservabilityHooks,
};
use thiserror::Error;

use crate::{
    ChatError, FanoutSessionHooks, FanoutToolHooks, FitnessConfig, ModelProvider, ProviderError,
    Session, SessionConfig, SessionHooks, SessionId, ToolRegistry, ToolRuntimeHooks,
    build_provider,
};

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    Config(#[from] FitnessError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Chat(#[from] ChatError),
}

/// Builds the health assistant session.
///
/// Defaults to the OpenAI endpoint described by the config, the full fitness
/// tool set, the assistant persona, and panic-isolated tracing plus metrics
/// hooks.
pub struct AssistantBuilder {
    config: FitnessConfig,
    provider: Option<Arc<dyn ModelProvider>>,
    registry: Option<ToolRegistry>,
    system_prompt: String,
    session_id: Option<SessionId>,
    hooks: Arc<dyn SessionHooks>,
    tool_hooks: Arc<dyn ToolRuntimeHooks>,
}

impl AssistantBuilder {
    pub fn new(config: FitnessConfig) -> Self {
        Self {
            config,
            provider: None,
            registry: None,
            system_prompt: SYSTEM_PROMPT.to_string(),
            session_id: None,
            hooks: Arc::new(
                FanoutSessionHooks::new()
                    .with(Arc::new(SafeSessionHooks::new(TracingObservabilityHooks)))
                    .with(Arc::new(SafeSessionHooks::new(MetricsObservabilityHooks))),
            ),
            tool_hooks: Arc::new(
                FanoutToolHooks::new()
                    .with(Arc::new(SafeToolHooks::new(TracingObservabilityHooks)))
                    .with(Arc::new(SafeToolHooks::new(MetricsObservabilityHooks))),
            ),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replaces the fitness tool set.
    pub fn registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn tool_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.tool_hooks = hooks;
        self
    }

    pub fn build(self) -> Result<Session, AssistantError> {
        let provider = match self.provider {
            Some(provider) => provider,
            None => build_provider(&self.config)?,
        };

        let session_config = SessionConfig::new(self.config.model.clone())
            .with_max_tool_rounds(self.config.max_tool_rounds)
            .with_system_prompt(self.system_prompt);

        let registry = match self.registry {
            Some(registry) => registry,
            None => fitness_registry(self.config)?,
        };

        let mut builder = Session::builder(provider)
            .registry(registry)
            .config(session_config)
            .hooks(self.hooks)
            .tool_hooks(self.tool_hooks);

        if let Some(session_id) = self.session_id {
            builder = builder.session_id(session_id);
        }

        Ok(builder.build()?)
    }
}

pub fn assistant(config: FitnessConfig) -> Result<Session, AssistantError> {
    AssistantBuilder::new(config).build()
}
