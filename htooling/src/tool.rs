//! Tool trait contract for registry-managed capabilities.
//!
//! ```rust
//! use htooling::{FunctionSignature, FunctionTool, ParamSpec, Tool, ToolError};
//! use serde_json::json;
//!
//! let tool = FunctionTool::new(
//!     FunctionSignature::new("echo").param(ParamSpec::new("text")),
//!     |args, _ctx| async move { Ok::<_, ToolError>(json!(args)) },
//! )
//! .expect("signature should derive");
//!
//! assert_eq!(tool.schema().name, "echo");
//! assert_eq!(tool.schema().required, vec!["text"]);
//! ```

use std::future::Future;
use std::sync::Arc;

use hcommon::BoxFuture;
use serde_json::{Map, Value};

use crate::{
    FixedArgs, FunctionSignature, SchemaError, ToolError, ToolExecutionContext, ToolSchema,
    derive_schema,
};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub trait Tool: Send + Sync {
    fn schema(&self) -> &ToolSchema;

    fn invoke<'a>(
        &'a self,
        args: Map<String, Value>,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<Value, ToolError>>;
}

type ToolHandler = dyn Fn(Map<String, Value>, ToolExecutionContext) -> ToolFuture<'static, Result<Value, ToolError>>
    + Send
    + Sync;

/// Closure-backed tool with an optional set of pre-bound arguments.
pub struct FunctionTool {
    schema: ToolSchema,
    fixed_args: FixedArgs,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    pub fn new<F, Fut>(signature: FunctionSignature, handler: F) -> Result<Self, SchemaError>
    where
        F: Fn(Map<String, Value>, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        Self::partial(signature, FixedArgs::new(), handler)
    }

    /// Binds `fixed_args` ahead of time; they are hidden from the schema and
    /// merged into every call, with model-supplied values taking precedence.
    pub fn partial<F, Fut>(
        signature: FunctionSignature,
        fixed_args: FixedArgs,
        handler: F,
    ) -> Result<Self, SchemaError>
    where
        F: Fn(Map<String, Value>, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        let schema = derive_schema(&signature, &fixed_args)?;
        let handler: Arc<ToolHandler> =
            Arc::new(move |args, context| Box::pin(handler(args, context)));

        Ok(Self {
            schema,
            fixed_args,
            handler,
        })
    }

    pub fn fixed_args(&self) -> &FixedArgs {
        &self.fixed_args
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("schema", &self.schema)
            .field("fixed_args", &self.fixed_args)
            .finish_non_exhaustive()
    }
}

impl Tool for FunctionTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    fn invoke<'a>(
        &'a self,
        args: Map<String, Value>,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<Value, ToolError>> {
        let mut merged = self.fixed_args.clone();
        merged.extend(args);
        (self.handler)(merged, context.clone())
    }
}
