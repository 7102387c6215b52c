use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use hchat::{AskOutcome, ChatError, SessionHooks};
use hcommon::SessionId;
use hprovider::{FinishReason, Message, ModelResponse, ToolCall};
use htooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

/// Wraps tool hooks so a panicking observer never aborts a dispatch.
pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_start(tool_call, context)
        }));
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_success(tool_call, context, result, elapsed)
        }));
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_failure(tool_call, context, error, elapsed)
        }));
    }
}

pub struct SafeSessionHooks<H> {
    inner: H,
}

impl<H> SafeSessionHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> SessionHooks for SafeSessionHooks<H>
where
    H: SessionHooks,
{
    fn on_ask_start(&self, session_id: &SessionId, query: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_ask_start(session_id, query)
        }));
    }

    fn on_round_start(&self, session_id: &SessionId, round: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_round_start(session_id, round)
        }));
    }

    fn on_model_response(&self, session_id: &SessionId, round: u32, response: &ModelResponse) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_model_response(session_id, round, response)
        }));
    }

    fn on_round_limit_reached(
        &self,
        session_id: &SessionId,
        round: u32,
        finish_reason: &FinishReason,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_round_limit_reached(session_id, round, finish_reason)
        }));
    }

    fn on_finalize(&self, session_id: &SessionId, rounds: u32, summary: &Message) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_finalize(session_id, rounds, summary)
        }));
    }

    fn on_ask_success(&self, session_id: &SessionId, outcome: &AskOutcome, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_ask_success(session_id, outcome, elapsed)
        }));
    }

    fn on_ask_failure(&self, session_id: &SessionId, error: &ChatError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_ask_failure(session_id, error, elapsed)
        }));
    }
}
