//! Tool runtime trait and default registry-backed executor.

use std::sync::Arc;
use std::time::Instant;

use hprovider::ToolCall;

use crate::{
    NoopToolRuntimeHooks, ToolError, ToolExecutionContext, ToolExecutionResult, ToolFuture,
    ToolRegistry, ToolRuntimeHooks, parse_json_object,
};

/// Executes one model-requested call.
///
/// Failures are classified by stage: `NotFound` for an unregistered name,
/// `InvalidArguments` when the arguments are not a JSON object, `Execution`
/// for anything raised by the tool itself.
pub trait ToolRuntime: Send + Sync {
    fn execute<'a>(
        &'a self,
        tool_call: &'a ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>>;
}

#[derive(Clone)]
pub struct DefaultToolRuntime {
    registry: Arc<ToolRegistry>,
    hooks: Arc<dyn ToolRuntimeHooks>,
}

impl DefaultToolRuntime {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }
}

impl Default for DefaultToolRuntime {
    fn default() -> Self {
        Self::new(Arc::new(ToolRegistry::new()))
    }
}

impl std::fmt::Debug for DefaultToolRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultToolRuntime")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl ToolRuntime for DefaultToolRuntime {
    fn execute<'a>(
        &'a self,
        tool_call: &'a ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>> {
        Box::pin(async move {
            self.hooks.on_execution_start(tool_call, &context);
            let started = Instant::now();

            let outcome = async {
                let tool = self.registry.get(&tool_call.name).ok_or_else(|| {
                    ToolError::not_found(format!("tool '{}' is not registered", tool_call.name))
                })?;
                let args = parse_json_object(&tool_call.arguments)?;
                let output = tool
                    .invoke(args, &context)
                    .await
                    .map_err(ToolError::into_execution)?;
                Ok::<_, ToolError>(ToolExecutionResult::from_call(tool_call, output))
            }
            .await
            .map_err(|err| err.with_tool_name(tool_call.name.as_str()));

            let elapsed = started.elapsed();
            match &outcome {
                Ok(result) => {
                    self.hooks
                        .on_execution_success(tool_call, &context, result, elapsed)
                }
                Err(error) => {
                    self.hooks
                        .on_execution_failure(tool_call, &context, error, elapsed)
                }
            }

            outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use hprovider::ToolCall;
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        FixedArgs, FunctionSignature, ParamSpec, Tool, ToolErrorKind, ToolSchema, derive_schema,
        required_i64,
    };

    #[derive(Debug)]
    struct EchoTool {
        schema: ToolSchema,
    }

    impl EchoTool {
        fn new() -> Self {
            let signature = FunctionSignature::new("echo").param(ParamSpec::new("text"));
            Self {
                schema: derive_schema(&signature, &FixedArgs::new()).expect("schema"),
            }
        }
    }

    impl Tool for EchoTool {
        fn schema(&self) -> &ToolSchema {
            &self.schema
        }

        fn invoke<'a>(
            &'a self,
            args: serde_json::Map<String, Value>,
            context: &'a ToolExecutionContext,
        ) -> ToolFuture<'a, Result<Value, ToolError>> {
            Box::pin(async move {
                Ok(json!({
                    "session": context.session_id.as_str(),
                    "round": context.round,
                    "text": args.get("text").cloned().unwrap_or(Value::Null),
                }))
            })
        }
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl ToolRuntimeHooks for RecordingHooks {
        fn on_execution_start(&self, tool_call: &ToolCall, _context: &ToolExecutionContext) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{}", tool_call.name));
        }

        fn on_execution_success(
            &self,
            tool_call: &ToolCall,
            _context: &ToolExecutionContext,
            _result: &ToolExecutionResult,
            _elapsed: std::time::Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{}", tool_call.name));
        }

        fn on_execution_failure(
            &self,
            tool_call: &ToolCall,
            _context: &ToolExecutionContext,
            error: &ToolError,
            _elapsed: std::time::Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{}:{:?}", tool_call.name, error.kind));
        }
    }

    fn add_signature() -> FunctionSignature {
        FunctionSignature::new("add")
            .param(ParamSpec::new("a").with_type_hint("i64"))
            .param(ParamSpec::new("b").with_type_hint("i64"))
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool::new());
        registry
            .register_sync_fn(add_signature(), |args, _ctx| {
                Ok(json!(required_i64(&args, "a")? + required_i64(&args, "b")?))
            })
            .expect("add should register");
        registry
    }

    #[tokio::test]
    async fn runtime_executes_registered_tool_with_context() {
        let runtime = DefaultToolRuntime::new(Arc::new(registry()));
        let call = ToolCall::new("echo", r#"{"text":"hello"}"#);

        let result = runtime
            .execute(&call, ToolExecutionContext::new("session-1").with_round(2))
            .await
            .expect("execution should succeed");

        assert_eq!(result.tool_name, "echo");
        assert_eq!(result.arguments, r#"{"text":"hello"}"#);
        assert_eq!(
            result.output,
            json!({"session": "session-1", "round": 2, "text": "hello"})
        );
    }

    #[tokio::test]
    async fn runtime_returns_not_found_for_unknown_tool() {
        let runtime = DefaultToolRuntime::new(Arc::new(registry()));
        let call = ToolCall::new("subtract", r#"{"a":2,"b":3}"#);

        let error = runtime
            .execute(&call, ToolExecutionContext::new("session-2"))
            .await
            .expect_err("execution should fail");

        assert_eq!(error.kind, ToolErrorKind::NotFound);
        assert_eq!(error.tool_name.as_deref(), Some("subtract"));
    }

    #[tokio::test]
    async fn runtime_rejects_non_object_arguments_before_invoking() {
        let runtime = DefaultToolRuntime::new(Arc::new(registry()));

        for arguments in ["{\"a\":", "[2, 3]"] {
            let call = ToolCall::new("add", arguments);
            let error = runtime
                .execute(&call, ToolExecutionContext::new("session-3"))
                .await
                .expect_err("execution should fail");
            assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
        }
    }

    #[tokio::test]
    async fn handler_failures_are_reported_as_execution_errors() {
        let runtime = DefaultToolRuntime::new(Arc::new(registry()));
        let call = ToolCall::new("add", r#"{"a":2}"#);

        let error = runtime
            .execute(&call, ToolExecutionContext::new("session-4"))
            .await
            .expect_err("missing b should fail inside the tool");

        assert_eq!(error.kind, ToolErrorKind::Execution);
        assert_eq!(error.message, "missing required integer: 'b'");
    }

    #[tokio::test]
    async fn partial_tools_merge_fixed_arguments_under_model_arguments() {
        let mut fixed = FixedArgs::new();
        fixed.insert("b".to_string(), json!(10));

        let mut registry = ToolRegistry::new();
        registry
            .register_partial(add_signature(), fixed, |args, _ctx| async move {
                let sum = required_i64(&args, "a")? + required_i64(&args, "b")?;
                Ok::<_, ToolError>(json!(sum))
            })
            .expect("partial should register");

        let schemas = registry.schemas();
        assert_eq!(schemas[0].required, vec!["a"]);

        let runtime = DefaultToolRuntime::new(Arc::new(registry));
        let bound = runtime
            .execute(&ToolCall::new("add", r#"{"a":2}"#), ToolExecutionContext::new("s"))
            .await
            .expect("bound call");
        assert_eq!(bound.output, json!(12));

        let overridden = runtime
            .execute(
                &ToolCall::new("add", r#"{"a":2,"b":3}"#),
                ToolExecutionContext::new("s"),
            )
            .await
            .expect("overridden call");
        assert_eq!(overridden.output, json!(5));
    }

    #[tokio::test]
    async fn hooks_observe_success_and_failure() {
        let hooks = Arc::new(RecordingHooks::default());
        let runtime = DefaultToolRuntime::new(Arc::new(registry())).with_hooks(hooks.clone());

        let _ = runtime
            .execute(&ToolCall::new("add", r#"{"a":2,"b":3}"#), ToolExecutionContext::new("s"))
            .await;
        let _ = runtime
            .execute(&ToolCall::new("subtract", "{}"), ToolExecutionContext::new("s"))
            .await;

        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(
            events,
            vec![
                "start:add".to_string(),
                "success:add".to_string(),
                "start:subtract".to_string(),
                "failure:subtract:NotFound".to_string(),
            ]
        );
    }

    #[test]
    fn registry_tracks_registered_tools_in_order() {
        let mut registry = registry();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("echo"));
        assert_eq!(registry.names(), vec!["echo", "add"]);
        assert_eq!(registry.definitions()[1].name, "add");

        let removed = registry.remove("echo");
        assert!(removed.is_some());
        assert_eq!(registry.len(), 1);
    }
}
