//! Tool-calling session: the bounded ask loop and final-answer assembly.
//!
//! Each [`Session::ask`] appends the user query, then queries the endpoint
//! with the full history plus a transient scratch of tool requests and
//! results. When the endpoint stops, or the configured number of tool rounds
//! is exhausted, the scratch is folded into one reasoning summary and the
//! endpoint is asked once more, without tools, for the answer.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hchat::{Session, SessionConfig};
//! use hprovider::{
//!     FinishReason, Message, ModelProvider, ModelRequest, ModelResponse, OutputItem,
//!     ProviderError, ProviderFuture, ProviderId, Role, TokenUsage,
//! };
//!
//! #[derive(Debug)]
//! struct Echo;
//!
//! impl ModelProvider for Echo {
//!     fn id(&self) -> ProviderId {
//!         ProviderId::OpenAiCompatible
//!     }
//!
//!     fn complete<'a>(
//!         &'a self,
//!         request: ModelRequest,
//!     ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
//!         Box::pin(async move {
//!             Ok(ModelResponse {
//!                 provider: ProviderId::OpenAiCompatible,
//!                 model: request.model,
//!                 output: vec![OutputItem::Message(Message::new(Role::Assistant, "Drink water."))],
//!                 finish_reason: FinishReason::Stop,
//!                 usage: TokenUsage::default(),
//!             })
//!         })
//!     }
//! }
//!
//! # tokio_test_block_on(async {
//! let mut session = Session::builder(Arc::new(Echo))
//!     .config(SessionConfig::new("gpt-4-0613"))
//!     .build()
//!     .expect("session should build");
//!
//! let outcome = session.ask("any hydration tips?").await.expect("ask should work");
//! assert_eq!(outcome.text(), "Drink water.");
//! assert_eq!(session.history().len(), 2);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(future: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(future)
//! # }
//! ```

use std::iter;
use std::sync::Arc;
use std::time::Instant;

use hcommon::{SessionId, TraceId};
use hprovider::{
    FinishReason, Message, ModelProvider, ModelRequest, ModelResponse, ProviderError, Role,
    TokenUsage, ToolDefinition,
};
use htooling::{
    DefaultToolRuntime, NoopToolRuntimeHooks, ToolExecutionContext, ToolRegistry, ToolRuntime,
    ToolRuntimeHooks, ToolSchema,
};

use crate::{
    AskOutcome, ChatError, ConversationHistory, NoopSessionHooks, SessionConfig, SessionHooks,
};

const SUMMARY_PREAMBLE: &str = "To answer the query, I will follow these steps:\n\n";
const SUMMARY_CLOSING: &str = " Based on this analysis, I will now formulate the response, \
                               assuming the user hasn't seen this thought process.";
const FUNCTION_RESULT_PREFIX: &str = "Function result: ";

/// Folds the scratch of one ask into the assistant message sent for finalization.
///
/// Tool requests are narrated with their name and raw arguments; every other
/// message contributes its content verbatim.
pub fn reasoning_summary(scratch: &[Message]) -> Message {
    let mut thought_process = String::from(SUMMARY_PREAMBLE);
    for message in scratch {
        match &message.tool_call {
            Some(call) => thought_process.push_str(&format!(
                "I will use the {} function with arguments: {}\n\n",
                call.name, call.arguments
            )),
            None => {
                thought_process.push_str(&message.content);
                thought_process.push_str("\n\n");
            }
        }
    }
    thought_process.push_str(SUMMARY_CLOSING);

    Message::new(Role::Assistant, thought_process)
}

pub struct SessionBuilder {
    provider: Arc<dyn ModelProvider>,
    registry: Arc<ToolRegistry>,
    config: SessionConfig,
    history: ConversationHistory,
    session_id: Option<SessionId>,
    hooks: Arc<dyn SessionHooks>,
    tool_hooks: Arc<dyn ToolRuntimeHooks>,
}

impl SessionBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            registry: Arc::new(ToolRegistry::new()),
            config: SessionConfig::default(),
            history: ConversationHistory::new(),
            session_id: None,
            hooks: Arc::new(NoopSessionHooks),
            tool_hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn registry(mut self, registry: impl Into<Arc<ToolRegistry>>) -> Self {
        self.registry = registry.into();
        self
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Seeds prior turns, e.g. a transcript restored by the caller.
    pub fn history(mut self, history: ConversationHistory) -> Self {
        self.history = history;
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

    pub fn build(self) -> Result<Session, ChatError> {
        if self.config.model.trim().is_empty() {
            return Err(ChatError::invalid_request("model must not be empty"));
        }

        if let Some(temperature) = self.config.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ChatError::invalid_request(
                "temperature must be within [0.0, 2.0]",
            ));
        }

        if self.config.max_tokens == Some(0) {
            return Err(ChatError::invalid_request(
                "max_tokens must be greater than zero",
            ));
        }

        let mut history = self.history;
        if let Some(prompt) = &self.config.system_prompt
            && !history.has_system_prompt()
        {
            history.insert_system_prompt(prompt.clone());
        }

        let schemas = self.registry.schemas();
        let definitions = schemas.iter().map(ToolSchema::to_tool_definition).collect();
        let runtime =
            DefaultToolRuntime::new(Arc::clone(&self.registry)).with_hooks(self.tool_hooks);

        Ok(Session {
            id: self.session_id.unwrap_or_else(SessionId::generate),
            provider: self.provider,
            runtime,
            schemas,
            definitions,
            config: self.config,
            history,
            hooks: self.hooks,
        })
    }
}

/// One conversation with the chat endpoint.
///
/// `ask` takes `&mut self`, so at most one ask is in flight per session.
/// Callers sharing a session across tasks wrap it in their own mutex.
pub struct Session {
    id: SessionId,
    provider: Arc<dyn ModelProvider>,
    runtime: DefaultToolRuntime,
    schemas: Vec<ToolSchema>,
    definitions: Vec<ToolDefinition>,
    config: SessionConfig,
    history: ConversationHistory,
    hooks: Arc<dyn SessionHooks>,
}

impl Session {
    pub fn builder(provider: Arc<dyn ModelProvider>) -> SessionBuilder {
        SessionBuilder::new(provider)
    }

    pub fn session_id(&self) -> &SessionId {
        &self.id
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn tool_schemas(&self) -> &[ToolSchema] {
        &self.schemas
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        self.runtime.registry()
    }

    /// Resolves `query` into a final assistant message.
    ///
    /// On success the user query and the final answer are appended to the
    /// history. On failure the history is left exactly as it was.
    pub async fn ask(&mut self, query: impl Into<String>) -> Result<AskOutcome, ChatError> {
        let query = query.into();
        let started = Instant::now();
        self.hooks.on_ask_start(&self.id, &query);

        if query.trim().is_empty() {
            let error = ChatError::invalid_request("query must not be empty");
            self.hooks.on_ask_failure(&self.id, &error, started.elapsed());
            return Err(error);
        }

        let checkpoint = self.history.len();
        self.history.push(Message::new(Role::User, query));

        match self.resolve().await {
            Ok(outcome) => {
                self.history.push(outcome.message.clone());
                self.hooks
                    .on_ask_success(&self.id, &outcome, started.elapsed());
                Ok(outcome)
            }
            Err(error) => {
                self.history.truncate(checkpoint);
                self.hooks.on_ask_failure(&self.id, &error, started.elapsed());
                Err(error)
            }
        }
    }

    async fn resolve(&self) -> Result<AskOutcome, ChatError> {
        let trace_id = TraceId::generate();
        let mut scratch = Vec::new();
        let mut tool_calls = Vec::new();
        let mut usage = TokenUsage::default();
        let mut round_limit_reached = false;
        let mut round = 0;

        loop {
            round += 1;
            self.hooks.on_round_start(&self.id, round);

            let messages = self.history.iter().chain(scratch.iter()).cloned();
            let response = self.query(messages, true).await?;
            usage += response.usage;
            self.hooks.on_model_response(&self.id, round, &response);

            if response.finish_reason == FinishReason::Stop {
                break;
            }

            if round > self.config.max_tool_rounds {
                self.hooks
                    .on_round_limit_reached(&self.id, round, &response.finish_reason);
                round_limit_reached = true;
                break;
            }

            match &response.finish_reason {
                FinishReason::ToolCall => {
                    let request = response.assistant_message();
                    let Some(call) = request.tool_call.clone() else {
                        return Err(ProviderError::invalid_response(
                            "finish reason requested a function call but none was returned",
                        )
                        .into());
                    };

                    let context = ToolExecutionContext::new(self.id.clone())
                        .with_trace_id(trace_id.clone())
                        .with_round(round);
                    let result = self
                        .runtime
                        .execute(&call, context)
                        .await
                        .map_err(|error| ChatError::from_tool_failure(&call, error))?;

                    scratch.push(request);
                    scratch.push(Message::new(
                        Role::Assistant,
                        format!("{FUNCTION_RESULT_PREFIX}{}", result.output_text()),
                    ));
                    tool_calls.push(call);
                }
                other => {
                    return Err(ChatError::UnexpectedFinishReason {
                        reason: other.as_str().to_string(),
                    });
                }
            }
        }

        let summary = reasoning_summary(&scratch);
        self.hooks.on_finalize(&self.id, round, &summary);

        let messages = self.history.iter().cloned().chain(iter::once(summary));
        let response = self.query(messages, false).await?;
        usage += response.usage;

        if response.finish_reason != FinishReason::Stop {
            return Err(ChatError::UnexpectedFinishReason {
                reason: response.finish_reason.as_str().to_string(),
            });
        }

        let text = response.text();
        if text.trim().is_empty() {
            return Err(ProviderError::invalid_response("final answer was empty").into());
        }

        Ok(AskOutcome {
            message: Message::new(Role::Assistant, text),
            response,
            tool_calls,
            rounds: round,
            round_limit_reached,
            usage,
            trace_id,
        })
    }

    async fn query(
        &self,
        messages: impl IntoIterator<Item = Message>,
        with_tools: bool,
    ) -> Result<ModelResponse, ChatError> {
        let mut builder = ModelRequest::builder(self.config.model.clone()).messages(messages);
        if with_tools && !self.definitions.is_empty() {
            builder = builder.tools(self.definitions.clone());
        }

        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }

        if let Some(max_tokens) = self.config.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        Ok(self.provider.complete(builder.build()?).await?)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("history_len", &self.history.len())
            .field("tools", &self.runtime.registry().names())
            .finish_non_exhaustive()
    }
}
