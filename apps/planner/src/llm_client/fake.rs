//! In-memory [`TextCompletion`] backend for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmError, PromptPair, TextCompletion};

pub struct FakeCompletion {
    reply: Result<String, (u16, String)>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<(PromptPair, String)>>,
}

impl FakeCompletion {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Ok(text.to_string()))
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self::with_reply(Err((status, message.to_string())))
    }

    fn with_reply(reply: Result<String, (u16, String)>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The prompt pair and model id of the most recent call.
    pub fn last_prompt(&self) -> Option<(PromptPair, String)> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextCompletion for FakeCompletion {
    async fn complete(&self, prompt: &PromptPair, model: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some((prompt.clone(), model.to_string()));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
