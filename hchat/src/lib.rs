//! Tool-calling conversation sessions over a chat endpoint.
//!
//! A [`Session`] owns one conversation: its [`ConversationHistory`], the
//! registry of callable tools and the schemas derived from it. [`Session::ask`]
//! drives the bounded ask / call / feed-back loop and returns an [`AskOutcome`].

mod error;
mod hooks;
mod session;
mod types;

pub mod prelude {
    pub use crate::{
        AskOutcome, ChatError, ChatErrorKind, ConversationHistory, Session, SessionBuilder,
        SessionConfig, SessionHooks,
    };
    pub use hcommon::{SessionId, TraceId};
    pub use htooling::{
        FunctionSignature, ParamSpec, Tool, ToolError, ToolErrorKind, ToolExecutionContext,
        ToolRegistry, ToolSchema,
    };
}

pub use error::{ChatError, ChatErrorKind};
pub use hooks::{FanoutSessionHooks, NoopSessionHooks, SessionHooks};
pub use session::{Session, SessionBuilder, reasoning_summary};
pub use types::{
    AskOutcome, ConversationHistory, DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_MODEL, SessionConfig,
};
pub use hcommon::{SessionId, TraceId};
