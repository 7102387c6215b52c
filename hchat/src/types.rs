//! Session configuration, conversation history, and ask outcome types.

use hcommon::TraceId;
use hprovider::{Message, ModelResponse, Role, TokenUsage, ToolCall};

pub const DEFAULT_MODEL: &str = "gpt-4-0613";
pub const DEFAULT_MAX_TOOL_ROUNDS: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub model: String,
    /// Tool-call rounds allowed after the first query; the query after the
    /// last allowed round is forced into finalization.
    pub max_tool_rounds: u32,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            system_prompt: None,
            temperature: None,
            max_tokens: None,
        }
    }
}

impl SessionConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_max_tool_rounds(mut self, max_tool_rounds: u32) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Total endpoint queries a single ask may spend before finalization.
    pub fn max_queries(&self) -> u32 {
        self.max_tool_rounds.saturating_add(1)
    }
}

/// Ordered conversation transcript. Callers can read it but only the owning
/// session appends to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: impl IntoIterator<Item = Message>) -> Self {
        Self {
            messages: messages.into_iter().collect(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_system_prompt(&self) -> bool {
        self.messages
            .first()
            .is_some_and(|message| message.role == Role::System)
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub(crate) fn insert_system_prompt(&mut self, prompt: String) {
        self.messages.insert(0, Message::new(Role::System, prompt));
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.messages.truncate(len);
    }
}

impl<'a> IntoIterator for &'a ConversationHistory {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskOutcome {
    /// The assistant message appended to history.
    pub message: Message,
    /// Raw endpoint response to the finalization query.
    pub response: ModelResponse,
    /// Calls executed during the ask, in order.
    pub tool_calls: Vec<ToolCall>,
    /// Endpoint queries spent before finalization.
    pub rounds: u32,
    pub round_limit_reached: bool,
    /// Summed across every query, finalization included.
    pub usage: TokenUsage,
    /// Stamped on every tool call made for this ask.
    pub trace_id: TraceId,
}

impl AskOutcome {
    pub fn text(&self) -> &str {
        &self.message.content
    }
}
