//! Line commands and renderers for the interactive shell.
//!
//! ```rust
//! use healthmate::repl::ReplCommand;
//!
//! assert_eq!(ReplCommand::parse(":quit"), ReplCommand::Quit);
//! assert_eq!(
//!     ReplCommand::parse("  What is my BMR? "),
//!     ReplCommand::Ask("What is my BMR?".to_string())
//! );
//! ```

use crate::{ConversationHistory, Message, Role, ToolSchema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Ask(String),
    History,
    Tools,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        if !line.starts_with(':') {
            return Self::Ask(line.to_string());
        }

        match line {
            ":history" => Self::History,
            ":tools" => Self::Tools,
            ":help" => Self::Help,
            ":quit" | ":exit" | ":q" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

pub const HELP: &str = "\
Type a question and press enter.
  :history  show the conversation so far
  :tools    show the function schemas sent to the model
  :help     show this list
  :quit     leave";

pub fn render_message(message: &Message) -> String {
    let role = message.role.as_str();
    match &message.tool_call {
        Some(call) if message.content.is_empty() => {
            format!("{role}: -> {}({})", call.name, call.arguments)
        }
        Some(call) => format!(
            "{role}: {} -> {}({})",
            message.content, call.name, call.arguments
        ),
        None => format!("{role}: {}", message.content),
    }
}

/// One line per message; the system prompt is collapsed to its first line.
pub fn render_history(history: &ConversationHistory) -> String {
    history
        .iter()
        .map(|message| match message.role {
            Role::System => {
                let first = message
                    .content
                    .lines()
                    .find(|line| !line.trim().is_empty())
                    .unwrap_or_default();
                format!("system: {first} ...")
            }
            _ => render_message(message),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_tool_schemas(schemas: &[ToolSchema]) -> Result<String, serde_json::Error> {
    let functions = schemas.iter().map(ToolSchema::to_json).collect::<Vec<_>>();
    serde_json::to_string_pretty(&functions)
}
