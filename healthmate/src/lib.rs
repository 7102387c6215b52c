//! Unified facade over the healthmate workspace crates.
//!
//! Most applications only need [`assistant`]: it loads the fitness tool set,
//! seeds the assistant persona and returns a ready [`Session`].
//!
//! ```rust
//! use healthmate::{FunctionSignature, ToolRegistry, tool_signature};
//!
//! let signature: FunctionSignature = tool_signature! {
//!     /// Add two numbers.
//!     ///
//!     /// :param a: First addend
//!     /// :param b: Second addend
//!     fn add(a: i64, b: i64)
//! };
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register_sync_fn(signature, |args, _ctx| {
//!         let a = healthmate::htooling::required_i64(&args, "a")?;
//!         let b = healthmate::htooling::required_i64(&args, "b")?;
//!         Ok(serde_json::json!(a + b))
//!     })
//!     .expect("add should register");
//!
//! assert_eq!(registry.schemas()[0].required, vec!["a", "b"]);
//! ```

pub mod prelude;
pub mod providers;
pub mod repl;
pub mod runtime;

pub use hchat;
pub use hcommon;
pub use hfitness;
pub use hobserve;
pub use hprovider;
pub use htooling;

pub use hchat::{
    AskOutcome, ChatError, ChatErrorKind, ConversationHistory, DEFAULT_MAX_TOOL_ROUNDS,
    DEFAULT_MODEL, FanoutSessionHooks, NoopSessionHooks, Session, SessionBuilder, SessionConfig, SessionHooks,
    reasoning_summary,
};
pub use hcommon::{BoxFuture, SessionId, TraceId};
pub use hfitness::{FitnessClient, FitnessConfig, FitnessError, SYSTEM_PROMPT, fitness_registry};
pub use hobserve::{
    MetricsObservabilityHooks, SafeSessionHooks, SafeToolHooks, TracingObservabilityHooks,
};
pub use hprovider::{
    FinishReason, Message, ModelProvider, ModelRequest, ModelResponse, OutputItem, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, Role, SecretString, TokenUsage, ToolCall,
    ToolDefinition,
};
pub use htooling::{
    DefaultToolRuntime, FanoutToolHooks, FixedArgs, FunctionSignature, FunctionTool,
    NoopToolRuntimeHooks, ParamSpec, ParamType, SchemaError, SchemaErrorKind, Tool, ToolError, ToolErrorKind,
    ToolExecutionContext, ToolExecutionResult, ToolRegistry, ToolRuntime, ToolRuntimeHooks,
    ToolSchema, derive_schema, tool_signature,
};

pub use providers::{DEFAULT_PROVIDER_TIMEOUT, build_provider, build_provider_with_timeout};
pub use runtime::{AssistantBuilder, AssistantError, assistant};
