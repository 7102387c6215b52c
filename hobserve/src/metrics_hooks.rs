//! Metrics-based observability hooks for tool dispatch and ask phases.
//!
//! ```rust
//! use hobserve::MetricsObservabilityHooks;
//! use htooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_tool_hooks(&hooks);
//! ```

use std::time::Duration;

use hchat::{AskOutcome, ChatError, SessionHooks};
use hcommon::SessionId;
use hprovider::{FinishReason, ModelResponse, ToolCall};
use htooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, _context: &ToolExecutionContext) {
        metrics::counter!(
            "healthmate_tool_execution_start_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "healthmate_tool_execution_success_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "healthmate_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "healthmate_tool_execution_failure_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "healthmate_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl SessionHooks for MetricsObservabilityHooks {
    fn on_ask_start(&self, _session_id: &SessionId, _query: &str) {
        metrics::counter!("healthmate_ask_start_total").increment(1);
    }

    fn on_model_response(&self, _session_id: &SessionId, _round: u32, response: &ModelResponse) {
        metrics::counter!(
            "healthmate_model_response_total",
            "provider" => response.provider.to_string(),
            "finish_reason" => response.finish_reason.to_string()
        )
        .increment(1);
        metrics::counter!(
            "healthmate_model_tokens_total",
            "provider" => response.provider.to_string()
        )
        .increment(u64::from(response.usage.total_tokens));
    }

    fn on_round_limit_reached(
        &self,
        _session_id: &SessionId,
        _round: u32,
        finish_reason: &FinishReason,
    ) {
        metrics::counter!(
            "healthmate_round_limit_reached_total",
            "finish_reason" => finish_reason.to_string()
        )
        .increment(1);
    }

    fn on_ask_success(&self, _session_id: &SessionId, outcome: &AskOutcome, elapsed: Duration) {
        metrics::counter!("healthmate_ask_success_total").increment(1);
        metrics::histogram!("healthmate_ask_rounds").record(f64::from(outcome.rounds));
        metrics::histogram!("healthmate_ask_duration_seconds", "status" => "success")
            .record(elapsed.as_secs_f64());
    }

    fn on_ask_failure(&self, _session_id: &SessionId, error: &ChatError, elapsed: Duration) {
        metrics::counter!(
            "healthmate_ask_failure_total",
            "error_kind" => format!("{:?}", error.kind())
        )
        .increment(1);
        metrics::histogram!("healthmate_ask_duration_seconds", "status" => "failure")
            .record(elapsed.as_secs_f64());
    }
}
