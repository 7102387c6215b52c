//! Tool execution and schema derivation errors.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    NotFound,
    InvalidArguments,
    Execution,
    Unauthorized,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", render_tool_error(.kind, .tool_name.as_deref(), .message))]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub retryable: bool,
    pub tool_name: Option<String>,
}

fn render_tool_error(kind: &ToolErrorKind, tool_name: Option<&str>, message: &str) -> String {
    match tool_name {
        Some(tool_name) => format!("{kind:?} [tool={tool_name}]: {message}"),
        None => format!("{kind:?}: {message}"),
    }
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
            tool_name: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message, false)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message, false)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Execution, message, false)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Unauthorized, message, false)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Other, message, false)
    }

    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    /// Reclassifies a failure raised from inside a tool body.
    ///
    /// Whatever a handler reports (including its own argument validation)
    /// happened after dispatch, so the runtime surfaces it as `Execution`.
    pub fn into_execution(mut self) -> Self {
        self.kind = ToolErrorKind::Execution;
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    pub fn is_user_error(&self) -> bool {
        matches!(
            self.kind,
            ToolErrorKind::InvalidArguments | ToolErrorKind::NotFound | ToolErrorKind::Unauthorized
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    /// No parameter metadata was supplied for the callable.
    NotIntrospectable,
    InvalidName,
    DuplicateParameter,
    UnknownFixedArgument,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind:?} [function={function}]: {message}")]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub function: String,
    pub message: String,
}

impl SchemaError {
    pub fn new(
        kind: SchemaErrorKind,
        function: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn not_introspectable(function: impl Into<String>) -> Self {
        Self::new(
            SchemaErrorKind::NotIntrospectable,
            function,
            "parameter metadata is not available",
        )
    }

    pub fn invalid_name(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(SchemaErrorKind::InvalidName, function, message)
    }

    pub fn duplicate_parameter(function: impl Into<String>, parameter: &str) -> Self {
        Self::new(
            SchemaErrorKind::DuplicateParameter,
            function,
            format!("parameter '{parameter}' is declared more than once"),
        )
    }

    pub fn unknown_fixed_argument(function: impl Into<String>, argument: &str) -> Self {
        Self::new(
            SchemaErrorKind::UnknownFixedArgument,
            function,
            format!("fixed argument '{argument}' does not name a declared parameter"),
        )
    }
}
