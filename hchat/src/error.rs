//! Session errors and classification.
//!
//! Nothing inside an `ask` is recovered locally: every failure aborts the
//! call and carries the tool name, raw arguments and cause needed to diagnose
//! it.

use hprovider::{ProviderError, ToolCall};
use htooling::{SchemaError, ToolError, ToolErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    SchemaDerivation,
    UnknownTool,
    ArgumentParse,
    ToolExecution,
    UnexpectedFinishReason,
    Provider,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("tool schema could not be derived: {0}")]
    SchemaDerivation(#[from] SchemaError),

    #[error("model requested unknown tool '{name}'")]
    UnknownTool { name: String, arguments: String },

    #[error("arguments for tool '{tool}' could not be parsed: {reason}")]
    ArgumentParse {
        tool: String,
        arguments: String,
        reason: String,
    },

    #[error("tool '{tool}' failed with arguments {arguments}")]
    ToolExecution {
        tool: String,
        arguments: String,
        #[source]
        source: ToolError,
    },

    #[error("unexpected finish reason '{reason}'")]
    UnexpectedFinishReason { reason: String },

    #[error("chat endpoint request failed")]
    Provider(#[from] ProviderError),
}

impl ChatError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Maps a runtime failure for `call` onto the dispatch stage that raised it.
    pub fn from_tool_failure(call: &ToolCall, error: ToolError) -> Self {
        match error.kind {
            ToolErrorKind::NotFound => Self::UnknownTool {
                name: call.name.clone(),
                arguments: call.arguments.clone(),
            },
            ToolErrorKind::InvalidArguments => Self::ArgumentParse {
                tool: call.name.clone(),
                arguments: call.arguments.clone(),
                reason: error.message,
            },
            _ => Self::ToolExecution {
                tool: call.name.clone(),
                arguments: call.arguments.clone(),
                source: error,
            },
        }
    }

    pub fn kind(&self) -> ChatErrorKind {
        match self {
            Self::InvalidRequest(_) => ChatErrorKind::InvalidRequest,
            Self::SchemaDerivation(_) => ChatErrorKind::SchemaDerivation,
            Self::UnknownTool { .. } => ChatErrorKind::UnknownTool,
            Self::ArgumentParse { .. } => ChatErrorKind::ArgumentParse,
            Self::ToolExecution { .. } => ChatErrorKind::ToolExecution,
            Self::UnexpectedFinishReason { .. } => ChatErrorKind::UnexpectedFinishReason,
            Self::Provider(_) => ChatErrorKind::Provider,
        }
    }

    /// The tool involved, for dispatch failures.
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            Self::UnknownTool { name, .. } => Some(name.as_str()),
            Self::ArgumentParse { tool, .. } | Self::ToolExecution { tool, .. } => {
                Some(tool.as_str())
            }
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(error) => error.is_retryable(),
            _ => false,
        }
    }
}
