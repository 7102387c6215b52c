//! Common imports for healthmate applications.

pub use crate::{
    AskOutcome, AssistantBuilder, AssistantError, ChatError, ConversationHistory, FitnessConfig,
    FunctionSignature, Message, ModelProvider, ParamSpec, Role, Session, SessionConfig,
    SessionHooks, Tool, ToolError, ToolRegistry, ToolRuntimeHooks, ToolSchema, assistant,
    tool_signature,
};
