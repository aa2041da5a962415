use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{AgentError, AgentResult};
use crate::models::message::{Message, Role};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: Role,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub message: CompletionMessage,
}

/// A model's answer to one prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

impl Completion {
    /// Build a single-choice assistant completion
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Self {
            choices: vec![Choice {
                message: CompletionMessage {
                    role: Role::Assistant,
                    content: Some(text.into()),
                },
            }],
            usage: Usage::default(),
        }
    }

    /// Text of the first choice; only that one is ever read
    pub fn content(&self) -> AgentResult<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                AgentError::InvalidModelResponse("Invalid response from model provider".into())
            })
    }
}

/// Base trait for model providers (OpenAI, Ollama, etc)
#[async_trait]
pub trait Provider: Send + Sync {
    /// Ask the model about `current_message`, given the conversation so far
    async fn complete(&self, current_message: &str, history: &[Message]) -> Result<Completion>;
}
