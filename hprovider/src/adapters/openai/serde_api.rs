//! OpenAI HTTP payload serde models and conversion helpers.
//!
//! Requests use the `functions` / `function_call` form of the chat completions
//! API: one function invocation per assistant turn, no call ids.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProviderError;

use super::types::{
    OpenAiAssistantMessage, OpenAiFinishReason, OpenAiFunction, OpenAiFunctionCall, OpenAiMessage,
    OpenAiRequest, OpenAiResponse, OpenAiUsage,
};

pub(crate) fn build_api_request(request: OpenAiRequest) -> Result<OpenAiApiRequest, ProviderError> {
    let messages = request
        .messages
        .into_iter()
        .map(OpenAiApiMessage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    if messages.is_empty() {
        return Err(ProviderError::invalid_request(
            "OpenAI request requires at least one message",
        ));
    }

    let functions = if request.functions.is_empty() {
        None
    } else {
        Some(
            request
                .functions
                .into_iter()
                .map(OpenAiApiFunction::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        )
    };

    Ok(OpenAiApiRequest {
        model: request.model,
        messages,
        functions,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    })
}

pub(crate) fn parse_finish_reason(value: Option<&str>) -> OpenAiFinishReason {
    match value {
        Some("stop") => OpenAiFinishReason::Stop,
        Some("function_call") | Some("tool_calls") => OpenAiFinishReason::FunctionCall,
        Some("length") => OpenAiFinishReason::Length,
        Some("content_filter") => OpenAiFinishReason::ContentFilter,
        Some(other) => OpenAiFinishReason::Other(other.to_string()),
        None => OpenAiFinishReason::Other("null".to_string()),
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<OpenAiApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiErrorEnvelope {
    pub error: OpenAiApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiApiRequest {
    pub model: String,
    pub messages: Vec<OpenAiApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<OpenAiApiFunction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiApiMessage {
    pub role: String,
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<OpenAiApiFunctionCall>,
}

impl TryFrom<OpenAiMessage> for OpenAiApiMessage {
    type Error = ProviderError;

    fn try_from(value: OpenAiMessage) -> Result<Self, Self::Error> {
        if value.content.trim().is_empty() && value.function_call.is_none() {
            return Err(ProviderError::invalid_request(
                "OpenAI message content must not be empty",
            ));
        }

        let content = if value.content.is_empty() {
            None
        } else {
            Some(value.content)
        };

        Ok(Self {
            role: value.role.as_str().to_string(),
            content,
            function_call: value.function_call.map(|call| OpenAiApiFunctionCall {
                name: call.name,
                arguments: call.arguments,
            }),
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiApiFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl TryFrom<OpenAiFunction> for OpenAiApiFunction {
    type Error = ProviderError;

    fn try_from(value: OpenAiFunction) -> Result<Self, Self::Error> {
        let parameters = serde_json::from_str::<Value>(&value.parameters_schema).map_err(|_| {
            ProviderError::invalid_request(format!(
                "parameter schema for function '{}' must be valid JSON",
                value.name
            ))
        })?;

        Ok(Self {
            name: value.name,
            description: value.description,
            parameters,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OpenAiApiFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiResponse {
    pub model: String,
    pub choices: Vec<OpenAiApiChoice>,
    pub usage: Option<OpenAiApiUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiChoice {
    pub message: OpenAiApiAssistantMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiAssistantMessage {
    pub content: Option<String>,
    pub function_call: Option<OpenAiApiFunctionCall>,
    pub tool_calls: Option<Vec<OpenAiApiToolCall>>,
}

/// Some OpenAI-compatible servers answer `functions` requests with `tool_calls`.
#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiToolCall {
    pub function: OpenAiApiFunctionCall,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TryFrom<OpenAiApiResponse> for OpenAiResponse {
    type Error = ProviderError;

    fn try_from(value: OpenAiApiResponse) -> Result<Self, Self::Error> {
        let choice = value.choices.into_iter().next().ok_or_else(|| {
            ProviderError::invalid_response("OpenAI response did not include choices")
        })?;

        let function_call = choice
            .message
            .function_call
            .or_else(|| {
                choice
                    .message
                    .tool_calls
                    .and_then(|calls| calls.into_iter().next())
                    .map(|call| call.function)
            })
            .map(|call| OpenAiFunctionCall {
                name: call.name,
                arguments: call.arguments,
            });

        let usage = value
            .usage
            .map(|usage| OpenAiUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            })
            .unwrap_or_default();

        Ok(Self {
            model: value.model,
            message: OpenAiAssistantMessage {
                content: choice.message.content.unwrap_or_default(),
                function_call,
            },
            finish_reason: parse_finish_reason(choice.finish_reason.as_deref()),
            usage,
        })
    }
}
