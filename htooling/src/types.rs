//! Tool runtime context and execution result types.

use hcommon::{SessionId, TraceId};
use hprovider::ToolCall;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionContext {
    pub session_id: SessionId,
    /// Shared by every call made while answering one query.
    pub trace_id: Option<TraceId>,
    /// 1-based round of the ask that requested the call.
    pub round: u32,
}

impl ToolExecutionContext {
    pub fn new(session_id: impl Into<SessionId>) -> Self {
        Self {
            session_id: session_id.into(),
            trace_id: None,
            round: 0,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<TraceId>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolExecutionResult {
    pub tool_name: String,
    pub arguments: String,
    pub output: Value,
}

impl ToolExecutionResult {
    pub fn from_call(call: &ToolCall, output: Value) -> Self {
        Self {
            tool_name: call.name.clone(),
            arguments: call.arguments.clone(),
            output,
        }
    }

    /// Text fed back to the model: strings verbatim, anything else as
    /// compact JSON.
    pub fn output_text(&self) -> String {
        match &self.output {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_output_is_passed_through_unquoted() {
        let call = ToolCall::new("handle_user_activity_data", r#"{"user_id":"u1"}"#);
        let result = ToolExecutionResult::from_call(
            &call,
            json!("On 2024-01-01:\n- Steps: 8000\n- Sleep: N/A minutes"),
        );

        assert_eq!(
            result.output_text(),
            "On 2024-01-01:\n- Steps: 8000\n- Sleep: N/A minutes"
        );
    }

    #[test]
    fn structured_output_is_compact_json() {
        let call = ToolCall::new("calculate_bmi", r#"{"weight":70,"height":175}"#);
        let number = ToolExecutionResult::from_call(&call, json!(22.86));
        let object = ToolExecutionResult::from_call(&call, json!({"Error": 401, "Message": "no key"}));

        assert_eq!(number.output_text(), "22.86");
        assert_eq!(object.output_text(), r#"{"Error":401,"Message":"no key"}"#);
    }
}
