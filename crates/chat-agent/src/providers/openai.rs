use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::base::{Completion, Provider};
use super::configs::OpenAiProviderConfig;
use super::utils::{handle_response, messages_to_openai_spec, openai_response_to_completion};
use crate::models::message::Message;

pub const OPENAI_HOST: &str = "https://api.openai.com";
pub const OPENAI_MODEL: &str = "gpt-4o";

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    async fn post(&self, payload: Value) -> Result<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        handle_response(&payload, response).await
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, current_message: &str, history: &[Message]) -> Result<Completion> {
        let messages = messages_to_openai_spec(&self.config.system_prompt, history, current_message);

        let mut payload = json!({
            "model": self.config.model,
            "messages": messages
        });
        let options = payload
            .as_object_mut()
            .ok_or_else(|| anyhow!("Payload is not an object"))?;

        if self.config.json_mode {
            options.insert(
                "response_format".to_string(),
                json!({"type": "json_object"}),
            );
        }
        if let Some(temp) = self.config.temperature {
            options.insert("temperature".to_string(), json!(temp));
        }
        if let Some(tokens) = self.config.max_tokens {
            options.insert("max_tokens".to_string(), json!(tokens));
        }

        let response = self.post(payload).await?;

        if let Some(error) = response.get("error") {
            return Err(anyhow!("OpenAI API error: {}", error));
        }

        let completion = openai_response_to_completion(&response)?;
        tracing::debug!(usage = ?completion.usage, "openai completion");
        Ok(completion)
    }
}
