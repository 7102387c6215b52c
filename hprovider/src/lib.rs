//! Chat endpoint contracts for the healthmate assistant.
//!
//! The orchestration core only ever talks to a [`ModelProvider`]: given a
//! message list and optional tool definitions it returns a [`ModelResponse`]
//! carrying a [`FinishReason`]. Concrete HTTP adapters live under [`adapters`].
//!
//! ```rust
//! use hprovider::{FinishReason, Message, ModelRequest, Role};
//!
//! let request = ModelRequest::builder("gpt-4-0613")
//!     .message(Message::new(Role::User, "How many calories are in an apple?"))
//!     .build()
//!     .expect("request should validate");
//!
//! assert_eq!(request.messages.len(), 1);
//! assert_eq!(FinishReason::from_raw("function_call"), FinishReason::ToolCall);
//! ```

mod credentials;
mod error;
mod model;
pub mod prelude;
mod provider;

pub mod adapters;

pub use credentials::SecretString;
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    FinishReason, Message, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem,
    ProviderId, Role, TokenUsage, ToolCall, ToolDefinition,
};
pub use provider::{ModelProvider, ProviderFuture};

pub use hcommon::{BoxFuture, GenerationOptions};
