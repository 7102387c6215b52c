//! Schema derivation and tool registration for the tool-calling loop.
//!
//! Tools are registered with a [`FunctionSignature`] describing their
//! parameters; the registry derives one [`ToolSchema`] per tool and the
//! [`DefaultToolRuntime`] dispatches model-requested calls by name.
//!
//! ```rust
//! use htooling::{FunctionSignature, ParamSpec, ToolRegistry, required_i64};
//! use serde_json::json;
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register_sync_fn(
//!         FunctionSignature::new("add")
//!             .param(ParamSpec::new("a").with_type_hint("i64"))
//!             .param(ParamSpec::new("b").with_type_hint("i64")),
//!         |args, _ctx| Ok(json!(required_i64(&args, "a")? + required_i64(&args, "b")?)),
//!     )
//!     .expect("add should register");
//!
//! assert_eq!(registry.schemas()[0].required, vec!["a", "b"]);
//! ```

mod args;
mod error;
mod hooks;
mod macros;
mod registry;
mod runtime;
mod schema;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        DefaultToolRuntime, FixedArgs, FunctionSignature, FunctionTool, ParamSpec, ParamType,
        SchemaError, SchemaErrorKind, Tool, ToolError, ToolErrorKind, ToolExecutionContext,
        ToolExecutionResult, ToolFuture, ToolRegistry, ToolRuntime, ToolSchema, derive_schema,
    };
}

pub use args::{
    optional_string, parse_json_object, parse_json_value, required_f64, required_i64,
    required_string,
};
pub use error::{SchemaError, SchemaErrorKind, ToolError, ToolErrorKind};
pub use hooks::{FanoutToolHooks, NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::ToolRegistry;
pub use runtime::{DefaultToolRuntime, ToolRuntime};
pub use schema::{
    FixedArgs, FunctionSignature, ParamSpec, ParamType, ParameterSchema, ToolSchema,
    derive_schema,
};
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use types::{ToolExecutionContext, ToolExecutionResult};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
