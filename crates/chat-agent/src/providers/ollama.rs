use super::base::{Completion, Provider};
use super::configs::OllamaProviderConfig;
use super::utils::{handle_response, messages_to_openai_spec, openai_response_to_completion};
use crate::models::message::Message;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

pub const OLLAMA_HOST: &str = "http://localhost:11434";
pub const OLLAMA_MODEL: &str = "qwen2.5";

pub struct OllamaProvider {
    client: Client,
    config: OllamaProviderConfig,
}

impl OllamaProvider {
    pub fn new(config: OllamaProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    async fn post(&self, payload: Value) -> Result<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let response = self.client.post(&url).json(&payload).send().await?;

        handle_response(&payload, response).await
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn complete(&self, current_message: &str, history: &[Message]) -> Result<Completion> {
        let messages = messages_to_openai_spec(&self.config.system_prompt, history, current_message);

        let mut payload = json!({
            "model": self.config.model,
            "messages": messages
        });
        let options = payload
            .as_object_mut()
            .ok_or_else(|| anyhow!("Payload is not an object"))?;

        if let Some(temp) = self.config.temperature {
            options.insert("temperature".to_string(), json!(temp));
        }
        if let Some(tokens) = self.config.max_tokens {
            options.insert("max_tokens".to_string(), json!(tokens));
        }

        let response = self.post(payload).await?;

        if let Some(error) = response.get("error") {
            return Err(anyhow!("Ollama API error: {}", error));
        }

        openai_response_to_completion(&response)
    }
}
