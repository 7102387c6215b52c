//! Provider-agnostic request, response, and message model types.
//!
//! ```rust
//! use hprovider::{Message, ModelRequest, ProviderErrorKind, Role, ToolCall};
//!
//! let ok = ModelRequest::builder("gpt-4-0613")
//!     .message(Message::new(Role::User, "What is my BMI?"))
//!     .build();
//! assert!(ok.is_ok());
//!
//! let err = ModelRequest::builder("")
//!     .message(Message::new(Role::User, "hi"))
//!     .build()
//!     .expect_err("empty model should fail");
//! assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
//!
//! let request = Message::tool_request(ToolCall::new("calculate_bmi", r#"{"weight":70}"#));
//! assert_eq!(request.role, Role::Assistant);
//! assert!(request.content.is_empty());
//! ```

use std::fmt::{Display, Formatter};
use std::ops::AddAssign;

use hcommon::GenerationOptions;

use crate::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenAi,
    OpenAiCompatible,
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::OpenAi => "openai",
            Self::OpenAiCompatible => "openai-compatible",
        };

        f.write_str(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A model's request to invoke a named function with JSON-encoded arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub tool_call: Option<ToolCall>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_call: None,
        }
    }

    /// An assistant message that carries only a function invocation request.
    pub fn tool_request(tool_call: ToolCall) -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            tool_call: Some(tool_call),
        }
    }

    pub fn with_tool_call(mut self, tool_call: ToolCall) -> Self {
        self.tool_call = Some(tool_call);
        self
    }
}

/// Wire-ready description of a callable tool.
///
/// `input_schema` holds the JSON-schema object for the tool's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputItem {
    Message(Message),
    ToolCall(ToolCall),
}

/// Why the endpoint stopped generating.
///
/// Only `Stop` and `ToolCall` are understood by the orchestration loop; the
/// raw signal of anything else is preserved for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    ToolCall,
    Other(String),
}

impl FinishReason {
    pub fn from_raw(value: &str) -> Self {
        match value {
            "stop" => Self::Stop,
            "function_call" | "tool_calls" => Self::ToolCall,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Stop => "stop",
            Self::ToolCall => "function_call",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl Display for FinishReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, rhs: Self) {
        self.input_tokens = self.input_tokens.saturating_add(rhs.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(rhs.output_tokens);
        self.total_tokens = self.total_tokens.saturating_add(rhs.total_tokens);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    pub provider: ProviderId,
    pub model: String,
    pub output: Vec<OutputItem>,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
}

impl ModelResponse {
    /// Concatenated assistant text across output items.
    pub fn text(&self) -> String {
        self.output
            .iter()
            .filter_map(|item| match item {
                OutputItem::Message(message) if message.role == Role::Assistant => {
                    Some(message.content.as_str())
                }
                _ => None,
            })
            .collect()
    }

    /// The first function invocation requested by the model, if any.
    pub fn tool_call(&self) -> Option<&ToolCall> {
        self.output.iter().find_map(|item| match item {
            OutputItem::ToolCall(call) => Some(call),
            OutputItem::Message(message) => message.tool_call.as_ref(),
        })
    }

    /// Collapses the output into one assistant message, keeping the first tool call.
    pub fn assistant_message(&self) -> Message {
        let message = Message::new(Role::Assistant, self.text());
        match self.tool_call() {
            Some(call) => message.with_tool_call(call.clone()),
            None => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: GenerationOptions,
    pub tools: Vec<ToolDefinition>,
}

impl ModelRequest {
    pub fn builder(model: impl Into<String>) -> ModelRequestBuilder {
        ModelRequestBuilder::new(model)
    }

    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: GenerationOptions::default(),
            tools: Vec::new(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.model.trim().is_empty() {
            return Err(ProviderError::invalid_request("model must not be empty"));
        }

        if self.messages.is_empty() {
            return Err(ProviderError::invalid_request(
                "at least one message is required",
            ));
        }

        if let Some(max_tokens) = self.options.max_tokens
            && max_tokens == 0
        {
            return Err(ProviderError::invalid_request(
                "max_tokens must be greater than zero",
            ));
        }

        if let Some(temperature) = self.options.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ProviderError::new(
                ProviderErrorKind::InvalidRequest,
                "temperature must be in the inclusive range 0.0..=2.0",
                false,
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequestBuilder {
    model: String,
    messages: Vec<Message>,
    options: GenerationOptions,
    tools: Vec<ToolDefinition>,
}

impl ModelRequestBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            options: GenerationOptions::default(),
            tools: Vec::new(),
        }
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn build(self) -> Result<ModelRequest, ProviderError> {
        let request = ModelRequest {
            model: self.model,
            messages: self.messages,
            options: self.options,
            tools: self.tools,
        };

        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_reason_parses_known_and_preserves_unknown_signals() {
        assert_eq!(FinishReason::from_raw("stop"), FinishReason::Stop);
        assert_eq!(FinishReason::from_raw("function_call"), FinishReason::ToolCall);
        assert_eq!(FinishReason::from_raw("tool_calls"), FinishReason::ToolCall);

        let other = FinishReason::from_raw("length");
        assert_eq!(other, FinishReason::Other("length".to_string()));
        assert_eq!(other.to_string(), "length");
    }

    #[test]
    fn response_helpers_extract_text_and_first_tool_call() {
        let response = ModelResponse {
            provider: ProviderId::OpenAi,
            model: "gpt-4-0613".to_string(),
            output: vec![
                OutputItem::Message(Message::new(Role::Assistant, "Let me check. ")),
                OutputItem::ToolCall(ToolCall::new("calculate_bmi", "{}")),
                OutputItem::ToolCall(ToolCall::new("calculate_bmr", "{}")),
            ],
            finish_reason: FinishReason::ToolCall,
            usage: TokenUsage::default(),
        };

        assert_eq!(response.text(), "Let me check. ");
        assert_eq!(
            response.tool_call().map(|call| call.name.as_str()),
            Some("calculate_bmi")
        );

        let message = response.assistant_message();
        assert_eq!(message.content, "Let me check. ");
        assert_eq!(
            message.tool_call,
            Some(ToolCall::new("calculate_bmi", "{}"))
        );
    }

    #[test]
    fn token_usage_accumulates_saturating() {
        let mut total = TokenUsage {
            input_tokens: u32::MAX - 1,
            output_tokens: 1,
            total_tokens: 3,
        };
        total += TokenUsage {
            input_tokens: 5,
            output_tokens: 2,
            total_tokens: 4,
        };

        assert_eq!(total.input_tokens, u32::MAX);
        assert_eq!(total.output_tokens, 3);
        assert_eq!(total.total_tokens, 7);
    }

    #[test]
    fn builder_applies_options_and_validates() {
        let request = ModelRequest::builder("gpt-4-0613")
            .messages(vec![Message::new(Role::System, "be brief")])
            .message(Message::new(Role::User, "hi"))
            .options(GenerationOptions::default().with_temperature(0.2))
            .max_tokens(64)
            .build()
            .expect("request should build");

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.options.temperature, Some(0.2));
        assert_eq!(request.options.max_tokens, Some(64));

        let error = ModelRequest::builder("gpt-4-0613")
            .build()
            .expect_err("empty messages should fail");
        assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
    }
}
