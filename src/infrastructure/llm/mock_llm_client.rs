use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::application::ports::{LlmClient, LlmClientError};

/// Replays scripted replies in order and records every prompt it receives.
/// Once the script runs out, the last reply is repeated.
pub struct MockLlmClient {
    replies: Mutex<VecDeque<String>>,
    last_reply: Mutex<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlmClient {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            last_reply: Mutex::new("Mock answer".to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        let next = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let mut last_reply = self.last_reply.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(reply) = next {
            *last_reply = reply;
        }
        Ok(last_reply.clone())
    }
}
