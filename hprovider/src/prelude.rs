//! Common `hprovider` imports for downstream crates.

pub use crate::{
    FinishReason, Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse,
    OutputItem, ProviderError, ProviderErrorKind, ProviderFuture, ProviderId, Role, SecretString,
    TokenUsage, ToolCall, ToolDefinition,
};
pub use hcommon::{BoxFuture, GenerationOptions};
