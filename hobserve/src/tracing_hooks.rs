//! Tracing-based observability hooks for tool dispatch and ask phases.
//!
//! ```rust
//! use hchat::SessionHooks;
//! use hobserve::TracingObservabilityHooks;
//!
//! fn accepts_session_hooks(_hooks: &dyn SessionHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_session_hooks(&hooks);
//! ```

use std::time::Duration;

use hchat::{AskOutcome, ChatError, SessionHooks};
use hcommon::SessionId;
use hprovider::{FinishReason, Message, ModelResponse, ToolCall};
use htooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = tool_call.name,
            arguments = tool_call.arguments,
            session_id = %context.session_id,
            round = context.round,
            trace_id = context.trace_id.as_ref().map(|id| id.as_str())
        );
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = tool_call.name,
            session_id = %context.session_id,
            round = context.round,
            trace_id = context.trace_id.as_ref().map(|id| id.as_str()),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "tool",
            event = "execution_failure",
            tool_name = tool_call.name,
            arguments = tool_call.arguments,
            session_id = %context.session_id,
            round = context.round,
            trace_id = context.trace_id.as_ref().map(|id| id.as_str()),
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl SessionHooks for TracingObservabilityHooks {
    fn on_ask_start(&self, session_id: &SessionId, query: &str) {
        tracing::info!(
            phase = "ask",
            event = "ask_start",
            session_id = %session_id,
            query_chars = query.chars().count()
        );
    }

    fn on_round_start(&self, session_id: &SessionId, round: u32) {
        tracing::debug!(
            phase = "ask",
            event = "round_start",
            session_id = %session_id,
            round
        );
    }

    fn on_model_response(&self, session_id: &SessionId, round: u32, response: &ModelResponse) {
        tracing::debug!(
            phase = "ask",
            event = "model_response",
            session_id = %session_id,
            round,
            provider = %response.provider,
            model = response.model,
            finish_reason = %response.finish_reason,
            total_tokens = response.usage.total_tokens
        );
    }

    fn on_round_limit_reached(
        &self,
        session_id: &SessionId,
        round: u32,
        finish_reason: &FinishReason,
    ) {
        tracing::warn!(
            phase = "ask",
            event = "round_limit_reached",
            session_id = %session_id,
            round,
            finish_reason = %finish_reason
        );
    }

    fn on_finalize(&self, session_id: &SessionId, rounds: u32, summary: &Message) {
        tracing::debug!(
            phase = "ask",
            event = "finalize",
            session_id = %session_id,
            rounds,
            summary_chars = summary.content.chars().count()
        );
    }

    fn on_ask_success(&self, session_id: &SessionId, outcome: &AskOutcome, elapsed: Duration) {
        tracing::info!(
            phase = "ask",
            event = "ask_success",
            session_id = %session_id,
            trace_id = %outcome.trace_id,
            rounds = outcome.rounds,
            tool_calls = outcome.tool_calls.len(),
            round_limit_reached = outcome.round_limit_reached,
            total_tokens = outcome.usage.total_tokens,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_ask_failure(&self, session_id: &SessionId, error: &ChatError, elapsed: Duration) {
        tracing::error!(
            phase = "ask",
            event = "ask_failure",
            session_id = %session_id,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind(),
            tool_name = error.tool_name(),
            error = %error
        );
    }
}
