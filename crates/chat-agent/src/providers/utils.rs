use anyhow::{anyhow, Result};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};

use super::base::{Choice, Completion, Usage};
use crate::models::message::Message;

/// Convert the prompt into the OpenAI chat messages array.
///
/// The system prompt goes first, then prior conversation in order, then the
/// message being answered.
pub fn messages_to_openai_spec(
    system_prompt: &str,
    history: &[Message],
    current_message: &str,
) -> Vec<Value> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(json!({
        "role": "system",
        "content": system_prompt
    }));
    for message in history {
        messages.push(json!({
            "role": message.role,
            "content": message.content
        }));
    }
    messages.push(json!({
        "role": "user",
        "content": current_message
    }));
    messages
}

pub fn openai_response_to_completion(response: &Value) -> Result<Completion> {
    let choices = match response.get("choices") {
        Some(choices) => serde_json::from_value::<Vec<Choice>>(choices.clone())
            .map_err(|e| anyhow!("Malformed choices in response: {}", e))?,
        None => Vec::new(),
    };

    Ok(Completion {
        choices,
        usage: get_usage(response),
    })
}

pub fn get_usage(data: &Value) -> Usage {
    let Some(usage) = data.get("usage") else {
        return Usage::default();
    };

    let input_tokens = usage
        .get("prompt_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let output_tokens = usage
        .get("completion_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let total_tokens = usage
        .get("total_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        });

    Usage::new(input_tokens, output_tokens, total_tokens)
}

/// Turn an HTTP response from a chat completions endpoint into its JSON body
pub async fn handle_response(payload: &Value, response: Response) -> Result<Value> {
    match response.status() {
        StatusCode::OK => Ok(response.json().await?),
        status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
            Err(anyhow!("Server error: {}", status))
        }
        status => Err(anyhow!("Request failed: {}\nPayload: {}", status, payload)),
    }
}
