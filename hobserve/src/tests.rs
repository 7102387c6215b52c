use std::sync::{Arc, Mutex};
use std::time::Duration;

use hchat::{AskOutcome, ChatError, Session, SessionHooks};
use hcommon::SessionId;
use hprovider::{
    FinishReason, Message, ModelProvider, ModelRequest, ModelResponse, OutputItem, ProviderError,
    ProviderFuture, ProviderId, Role, TokenUsage, ToolCall,
};
use htooling::{
    FunctionSignature, ParamSpec, ToolError, ToolExecutionContext, ToolExecutionResult,
    ToolRegistry, ToolRuntimeHooks,
};
use serde_json::json;

use crate::{
    MetricsObservabilityHooks, SafeSessionHooks, SafeToolHooks, TracingObservabilityHooks,
};

fn sample_tool_call() -> ToolCall {
    ToolCall::new("calculate_bmi", r#"{"weight":70,"height":1.75}"#)
}

fn sample_tool_context() -> ToolExecutionContext {
    ToolExecutionContext::new("session-1")
        .with_trace_id("trace-1")
        .with_round(1)
}

fn sample_result() -> ToolExecutionResult {
    ToolExecutionResult::from_call(&sample_tool_call(), json!(22.86))
}

fn response(finish_reason: FinishReason, output: OutputItem) -> ModelResponse {
    ModelResponse {
        provider: ProviderId::OpenAi,
        model: "gpt-4-0613".to_string(),
        output: vec![output],
        finish_reason,
        usage: TokenUsage {
            input_tokens: 8,
            output_tokens: 4,
            total_tokens: 12,
        },
    }
}

fn stop_response() -> ModelResponse {
    response(
        FinishReason::Stop,
        OutputItem::Message(Message::new(Role::Assistant, "Your BMI is 22.9.")),
    )
}

fn sample_outcome() -> AskOutcome {
    let response = stop_response();
    AskOutcome {
        message: Message::new(Role::Assistant, response.text()),
        response,
        tool_calls: vec![sample_tool_call()],
        rounds: 2,
        round_limit_reached: false,
        usage: TokenUsage::default(),
        trace_id: "trace-1".into(),
    }
}

fn exercise_tool_hooks(hooks: &dyn ToolRuntimeHooks) {
    let tool_error = ToolError::execution("tool failed").with_tool_name("calculate_bmi");

    hooks.on_execution_start(&sample_tool_call(), &sample_tool_context());
    hooks.on_execution_success(
        &sample_tool_call(),
        &sample_tool_context(),
        &sample_result(),
        Duration::from_millis(20),
    );
    hooks.on_execution_failure(
        &sample_tool_call(),
        &sample_tool_context(),
        &tool_error,
        Duration::from_millis(20),
    );
}

fn exercise_session_hooks(hooks: &dyn SessionHooks) {
    let session_id = SessionId::from("session-1");
    let error = ChatError::UnexpectedFinishReason {
        reason: "length".to_string(),
    };

    hooks.on_ask_start(&session_id, "What is my BMI?");
    hooks.on_round_start(&session_id, 1);
    hooks.on_model_response(&session_id, 1, &stop_response());
    hooks.on_round_limit_reached(&session_id, 4, &FinishReason::ToolCall);
    hooks.on_finalize(
        &session_id,
        2,
        &Message::new(Role::Assistant, "To answer the query"),
    );
    hooks.on_ask_success(&session_id, &sample_outcome(), Duration::from_millis(30));
    hooks.on_ask_failure(&session_id, &error, Duration::from_millis(30));
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    exercise_tool_hooks(&TracingObservabilityHooks);
    exercise_session_hooks(&TracingObservabilityHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    exercise_tool_hooks(&MetricsObservabilityHooks);
    exercise_session_hooks(&MetricsObservabilityHooks);
}

#[derive(Default, Clone)]
struct RecordingToolHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl ToolRuntimeHooks for RecordingToolHooks {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {
        self.events.lock().expect("events lock").push("start");
    }

    fn on_execution_success(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
        self.events.lock().expect("events lock").push("success");
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        self.events.lock().expect("events lock").push("failure");
    }
}

#[derive(Default, Clone)]
struct RecordingSessionHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingSessionHooks {
    fn push(&self, event: &'static str) {
        self.events.lock().expect("events lock").push(event);
    }
}

impl SessionHooks for RecordingSessionHooks {
    fn on_ask_start(&self, _session_id: &SessionId, _query: &str) {
        self.push("ask_start");
    }

    fn on_round_start(&self, _session_id: &SessionId, _round: u32) {
        self.push("round_start");
    }

    fn on_model_response(&self, _session_id: &SessionId, _round: u32, _response: &ModelResponse) {
        self.push("model_response");
    }

    fn on_round_limit_reached(
        &self,
        _session_id: &SessionId,
        _round: u32,
        _finish_reason: &FinishReason,
    ) {
        self.push("round_limit_reached");
    }

    fn on_finalize(&self, _session_id: &SessionId, _rounds: u32, _summary: &Message) {
        self.push("finalize");
    }

    fn on_ask_success(&self, _session_id: &SessionId, _outcome: &AskOutcome, _elapsed: Duration) {
        self.push("ask_success");
    }

    fn on_ask_failure(&self, _session_id: &SessionId, _error: &ChatError, _elapsed: Duration) {
        self.push("ask_failure");
    }
}

struct PanicToolHooks;

impl ToolRuntimeHooks for PanicToolHooks {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {
        panic!("start panic");
    }

    fn on_execution_success(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
        panic!("success panic");
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        panic!("failure panic");
    }
}

struct PanicSessionHooks;

impl SessionHooks for PanicSessionHooks {
    fn on_ask_start(&self, _session_id: &SessionId, _query: &str) {
        panic!("ask_start panic");
    }

    fn on_round_start(&self, _session_id: &SessionId, _round: u32) {
        panic!("round_start panic");
    }

    fn on_model_response(&self, _session_id: &SessionId, _round: u32, _response: &ModelResponse) {
        panic!("model_response panic");
    }

    fn on_round_limit_reached(
        &self,
        _session_id: &SessionId,
        _round: u32,
        _finish_reason: &FinishReason,
    ) {
        panic!("round_limit_reached panic");
    }

    fn on_finalize(&self, _session_id: &SessionId, _rounds: u32, _summary: &Message) {
        panic!("finalize panic");
    }

    fn on_ask_success(&self, _session_id: &SessionId, _outcome: &AskOutcome, _elapsed: Duration) {
        panic!("ask_success panic");
    }

    fn on_ask_failure(&self, _session_id: &SessionId, _error: &ChatError, _elapsed: Duration) {
        panic!("ask_failure panic");
    }
}

#[test]
fn safe_tool_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingToolHooks::default();
    let events = Arc::clone(&inner.events);
    let hooks = SafeToolHooks::new(inner);

    exercise_tool_hooks(&hooks);

    assert_eq!(
        *events.lock().expect("events lock"),
        vec!["start", "success", "failure"]
    );
}

#[test]
fn safe_session_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingSessionHooks::default();
    let events = Arc::clone(&inner.events);
    let hooks = SafeSessionHooks::new(inner);

    exercise_session_hooks(&hooks);

    assert_eq!(events.lock().expect("events lock").len(), 7);
}

#[test]
fn safe_tool_hooks_swallow_panics() {
    exercise_tool_hooks(&SafeToolHooks::new(PanicToolHooks));
}

#[test]
fn safe_session_hooks_swallow_panics() {
    exercise_session_hooks(&SafeSessionHooks::new(PanicSessionHooks));
}

/// Requests `calculate_bmi` once, then answers.
struct BmiProvider;

impl ModelProvider for BmiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            let already_called = request
                .messages
                .iter()
                .any(|message| message.tool_call.is_some());
            if request.tools.is_empty() || already_called {
                Ok(stop_response())
            } else {
                Ok(response(
                    FinishReason::ToolCall,
                    OutputItem::ToolCall(sample_tool_call()),
                ))
            }
        })
    }
}

fn bmi_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry
        .register_sync_fn(
            FunctionSignature::new("calculate_bmi")
                .param(ParamSpec::new("weight").with_type_hint("f64"))
                .param(ParamSpec::new("height").with_type_hint("f64")),
            |_args, _ctx| Ok(json!(22.86)),
        )
        .expect("signature should derive");
    registry
}

#[tokio::test]
async fn panicking_observers_do_not_break_an_ask() {
    let mut session = Session::builder(Arc::new(BmiProvider))
        .registry(bmi_registry())
        .hooks(Arc::new(SafeSessionHooks::new(PanicSessionHooks)))
        .tool_hooks(Arc::new(SafeToolHooks::new(PanicToolHooks)))
        .build()
        .expect("session should build");

    let outcome = session
        .ask("What is my BMI?")
        .await
        .expect("ask should succeed");

    assert_eq!(outcome.text(), "Your BMI is 22.9.");
    assert_eq!(outcome.tool_calls, vec![sample_tool_call()]);
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn session_reports_lifecycle_through_wrapped_hooks() {
    let session_hooks = RecordingSessionHooks::default();
    let session_events = Arc::clone(&session_hooks.events);
    let tool_hooks = RecordingToolHooks::default();
    let tool_events = Arc::clone(&tool_hooks.events);

    let mut session = Session::builder(Arc::new(BmiProvider))
        .registry(bmi_registry())
        .hooks(Arc::new(SafeSessionHooks::new(session_hooks)))
        .tool_hooks(Arc::new(SafeToolHooks::new(tool_hooks)))
        .build()
        .expect("session should build");

    session
        .ask("What is my BMI?")
        .await
        .expect("ask should succeed");

    assert_eq!(
        *session_events.lock().expect("events lock"),
        vec![
            "ask_start",
            "round_start",
            "model_response",
            "round_start",
            "model_response",
            "finalize",
            "ask_success",
        ]
    );
    assert_eq!(
        *tool_events.lock().expect("events lock"),
        vec!["start", "success"]
    );
}
