use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use crate::models::message::Message;
use crate::providers::base::{Completion, Provider};

/// A call the mock provider received
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPrompt {
    pub current_message: String,
    pub history: Vec<Message>,
}

/// A mock provider that returns pre-configured responses for testing
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Result<Completion>>>>,
    prompts: Arc<Mutex<Vec<RecordedPrompt>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<Result<Completion>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Provider that answers once with `text` as the completion content
    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(Completion::from_text(text))])
    }

    pub fn prompts(&self) -> Vec<RecordedPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, current_message: &str, history: &[Message]) -> Result<Completion> {
        self.prompts.lock().unwrap().push(RecordedPrompt {
            current_message: current_message.to_string(),
            history: history.to_vec(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(anyhow!("MockProvider has no responses left"))
        } else {
            responses.remove(0)
        }
    }
}
