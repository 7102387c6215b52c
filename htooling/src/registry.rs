//! Tool registry keyed by schema name, in registration order.

use std::future::Future;
use std::sync::Arc;

use hcommon::Registry;
use hprovider::ToolDefinition;
use serde_json::{Map, Value};

use crate::{
    FixedArgs, FunctionSignature, FunctionTool, SchemaError, Tool, ToolError,
    ToolExecutionContext, ToolSchema,
};

#[derive(Default)]
pub struct ToolRegistry {
    tools: Registry<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `tool` under its schema name, replacing any previous entry.
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        let name = tool.schema().name.clone();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn register_fn<F, Fut>(
        &mut self,
        signature: FunctionSignature,
        handler: F,
    ) -> Result<(), SchemaError>
    where
        F: Fn(Map<String, Value>, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::new(signature, handler)?);
        Ok(())
    }

    pub fn register_sync_fn<F>(
        &mut self,
        signature: FunctionSignature,
        handler: F,
    ) -> Result<(), SchemaError>
    where
        F: Fn(Map<String, Value>, ToolExecutionContext) -> Result<Value, ToolError>
            + Send
            + Sync
            + 'static,
    {
        self.register_fn(signature, move |args, context| {
            let output = handler(args, context);
            async move { output }
        })
    }

    pub fn register_partial<F, Fut>(
        &mut self,
        signature: FunctionSignature,
        fixed_args: FixedArgs,
        handler: F,
    ) -> Result<(), SchemaError>
    where
        F: Fn(Map<String, Value>, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::partial(signature, fixed_args, handler)?);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.remove(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .values()
            .map(|tool| tool.schema().clone())
            .collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| tool.schema().to_tool_definition())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
