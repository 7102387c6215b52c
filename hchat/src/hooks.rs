//! Lifecycle hooks for the tool-calling loop.
//!
//! Events arrive in ask order: `on_ask_start`, then per round
//! `on_round_start` and `on_model_response`, optionally
//! `on_round_limit_reached`, then `on_finalize` and one of the terminal
//! events.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hchat::{FanoutSessionHooks, NoopSessionHooks, SessionHooks};
//!
//! let hooks: Arc<dyn SessionHooks> =
//!     Arc::new(FanoutSessionHooks::new().with(Arc::new(NoopSessionHooks)));
//! hooks.on_round_start(&"session-1".into(), 1);
//! ```

use std::sync::Arc;
use std::time::Duration;

use hcommon::SessionId;
use hprovider::{FinishReason, Message, ModelResponse};

use crate::{AskOutcome, ChatError};

pub trait SessionHooks: Send + Sync {
    fn on_ask_start(&self, _session_id: &SessionId, _query: &str) {}

    fn on_round_start(&self, _session_id: &SessionId, _round: u32) {}

    fn on_model_response(&self, _session_id: &SessionId, _round: u32, _response: &ModelResponse) {}

    /// The query numbered `round` did not stop and no rounds remain.
    fn on_round_limit_reached(
        &self,
        _session_id: &SessionId,
        _round: u32,
        _finish_reason: &FinishReason,
    ) {
    }

    fn on_finalize(&self, _session_id: &SessionId, _rounds: u32, _summary: &Message) {}

    fn on_ask_success(&self, _session_id: &SessionId, _outcome: &AskOutcome, _elapsed: Duration) {}

    fn on_ask_failure(&self, _session_id: &SessionId, _error: &ChatError, _elapsed: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionHooks;

impl SessionHooks for NoopSessionHooks {}

/// Forwards every lifecycle event to each inner hook in insertion order.
#[derive(Clone, Default)]
pub struct FanoutSessionHooks {
    hooks: Vec<Arc<dyn SessionHooks>>,
}

impl FanoutSessionHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
        self.hooks.push(hooks);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for FanoutSessionHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutSessionHooks")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl SessionHooks for FanoutSessionHooks {
    fn on_ask_start(&self, session_id: &SessionId, query: &str) {
        self.hooks
            .iter()
            .for_each(|hooks| hooks.on_ask_start(session_id, query));
    }

    fn on_round_start(&self, session_id: &SessionId, round: u32) {
        self.hooks
            .iter()
            .for_each(|hooks| hooks.on_round_start(session_id, round));
    }

    fn on_model_response(&self, session_id: &SessionId, round: u32, response: &ModelResponse) {
        self.hooks
            .iter()
            .for_each(|hooks| hooks.on_model_response(session_id, round, response));
    }

    fn on_round_limit_reached(
        &self,
        session_id: &SessionId,
        round: u32,
        finish_reason: &FinishReason,
    ) {
        self.hooks
            .iter()
            .for_each(|hooks| hooks.on_round_limit_reached(session_id, round, finish_reason));
    }

    fn on_finalize(&self, session_id: &SessionId, rounds: u32, summary: &Message) {
        self.hooks
            .iter()
            .for_each(|hooks| hooks.on_finalize(session_id, rounds, summary));
    }

    fn on_ask_success(&self, session_id: &SessionId, outcome: &AskOutcome, elapsed: Duration) {
        self.hooks
            .iter()
            .for_each(|hooks| hooks.on_ask_success(session_id, outcome, elapsed));
    }

    fn on_ask_failure(&self, session_id: &SessionId, error: &ChatError, elapsed: Duration) {
        self.hooks
            .iter()
            .for_each(|hooks| hooks.on_ask_failure(session_id, error, elapsed));
    }
}
