//! The environment the page runs in.
//!
//! Blocking dialogs and navigation belong to the host (a browser window, a
//! terminal, a test harness), not to the interaction layer.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Host services used by the interaction layer.
pub trait Host: Send + Sync + 'static {
    /// Ask the user a yes/no question and block until they answer.
    fn confirm(&self, message: &str) -> bool;

    /// Show a message and block until the user acknowledges it.
    fn alert(&self, message: &str);

    /// Reload the current page.
    fn reload(&self);
}

/// Headless host with scripted dialog answers.
///
/// Confirmation answers are consumed from a queue, falling back to a default
/// (initially "decline"). Every prompt, alert and reload is recorded.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    state: Mutex<ScriptedState>,
}

#[derive(Debug, Default)]
struct ScriptedState {
    confirm_responses: VecDeque<bool>,
    default_confirm_response: bool,
    confirm_prompts: Vec<String>,
    alert_messages: Vec<String>,
    reloads: usize,
}

impl ScriptedHost {
    /// Create a host that declines every confirmation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host that accepts every confirmation.
    #[must_use]
    pub fn accepting() -> Self {
        let host = Self::default();
        host.set_default_confirm_response(true);
        host
    }

    /// Queue the answer to the next confirmation.
    pub fn enqueue_confirm_response(&self, accepted: bool) {
        self.state().confirm_responses.push_back(accepted);
    }

    /// Answer used once the queue is empty.
    pub fn set_default_confirm_response(&self, accepted: bool) {
        self.state().default_confirm_response = accepted;
    }

    /// Drain the confirmation prompts shown so far.
    #[must_use]
    pub fn take_confirm_prompts(&self) -> Vec<String> {
        std::mem::take(&mut self.state().confirm_prompts)
    }

    /// Drain the alert messages shown so far.
    #[must_use]
    pub fn take_alert_messages(&self) -> Vec<String> {
        std::mem::take(&mut self.state().alert_messages)
    }

    /// Number of reloads requested.
    #[must_use]
    pub fn reload_count(&self) -> usize {
        self.state().reloads
    }

    fn state(&self) -> MutexGuard<'_, ScriptedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Host for ScriptedHost {
    fn confirm(&self, message: &str) -> bool {
        let mut state = self.state();
        state.confirm_prompts.push(message.to_string());
        let default = state.default_confirm_response;
        state.confirm_responses.pop_front().unwrap_or(default)
    }

    fn alert(&self, message: &str) {
        self.state().alert_messages.push(message.to_string());
    }

    fn reload(&self) {
        self.state().reloads += 1;
    }
}
