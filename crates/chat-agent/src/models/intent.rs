use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum_macros::{Display, EnumIter, EnumString};

use crate::errors::{AgentError, AgentResult};

/// Reply used when the model classifies a message as chat but gives no text
pub const FALLBACK_REPLY: &str = "I'm sorry, I didn't understand that.";

/// What the user asked for, as classified by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum Intent {
    #[strum(serialize = "SWAP")]
    Swap,
    #[strum(serialize = "GET_SWAP_RECEIPT")]
    GetSwapReceipt,
    #[strum(serialize = "NOT_SWAP")]
    NotSwap,
}

/// The JSON object the model is asked to answer with.
///
/// This is untrusted output: every field is optional and only the fields a
/// branch needs are checked, when that branch is taken.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedResponse {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub intent: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_text: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
}

impl ExpectedResponse {
    pub fn from_content(content: &str) -> AgentResult<Self> {
        serde_json::from_str(content).map_err(|e| {
            AgentError::InvalidModelResponse(format!("Failed to parse model response: {}", e))
        })
    }

    pub fn intent(&self) -> AgentResult<Intent> {
        match &self.intent {
            Some(Value::String(raw)) => raw
                .parse()
                .map_err(|_| AgentError::UnhandledIntent(raw.clone())),
            Some(other) => Err(AgentError::UnhandledIntent(other.to_string())),
            None => Err(AgentError::UnhandledIntent("undefined".to_string())),
        }
    }

    /// The purchase to look up a receipt for.
    ///
    /// `amount` must be present too, although the lookup does not use it.
    pub fn receipt_request(&self) -> AgentResult<String> {
        let purchase_id = self
            .purchase_id
            .as_ref()
            .filter(|id| is_truthy(id))
            .ok_or(AgentError::MissingReceiptFields)?;

        if !self.amount.as_ref().is_some_and(is_truthy) {
            return Err(AgentError::MissingReceiptFields);
        }

        Ok(as_text(purchase_id))
    }

    pub fn chat_reply(&self) -> ChatReply {
        let message = self
            .response_text
            .as_ref()
            .filter(|text| is_truthy(text))
            .map(as_text)
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());
        ChatReply::success(message)
    }
}

// Keeps an explicit `null` apart from an absent field
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// Strings as they are, anything else as its JSON text
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Payload for messages that are plain conversation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub status: &'static str,
}

impl ChatReply {
    pub fn success<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            status: "success",
        }
    }
}

impl From<ChatReply> for Value {
    fn from(reply: ChatReply) -> Self {
        json!({
            "message": reply.message,
            "status": reply.status,
        })
    }
}

// Empty strings, zero, false and null all count as "not provided"
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
