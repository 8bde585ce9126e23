use std::sync::{Arc, Mutex};

use super::ChatBackend;
use super::error::GenerationError;

/// In-memory stand-in for the chat backend.
///
/// Default state behaves like a missing API key; tests opt into canned
/// replies or injected failures. Every prompt is recorded so tests can
/// assert call counts and prompt contents.
#[derive(Clone, Default)]
pub struct MockChat {
    inner: Arc<Mutex<MockChatState>>,
}

#[derive(Default)]
struct MockChatState {
    mode: Mode,
    prompts: Vec<String>,
}

#[derive(Default)]
enum Mode {
    /// No key configured; every call fails with `MissingApiKey`.
    #[default]
    Unconfigured,
    /// Every call succeeds with this text.
    Reply(String),
    /// Every call fails with this backend error.
    Fail(u16, String),
}

impl MockChat {
    /// A backend with no API key configured.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// A backend that answers every prompt with `text`.
    pub fn replying(text: &str) -> Self {
        let mock = Self::default();
        mock.inner.lock().expect("mock lock").mode = Mode::Reply(text.to_string());
        mock
    }

    /// A backend that fails every call with the given API error.
    pub fn failing(status: u16, body: &str) -> Self {
        let mock = Self::default();
        mock.inner.lock().expect("mock lock").mode = Mode::Fail(status, body.to_string());
        mock
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().expect("mock lock").prompts.len()
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.inner.lock().expect("mock lock").prompts.clone()
    }
}

impl ChatBackend for MockChat {
    async fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<String, GenerationError> {
        let mut state = self.inner.lock().expect("mock lock");
        state.prompts.push(prompt.to_string());
        match &state.mode {
            Mode::Unconfigured => Err(GenerationError::MissingApiKey),
            Mode::Reply(text) => Ok(text.clone()),
            Mode::Fail(status, body) => Err(GenerationError::Api {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
