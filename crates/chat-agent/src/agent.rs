use serde_json::Value;
use std::sync::Arc;

use crate::errors::{AgentError, AgentResult};
use crate::models::intent::{ExpectedResponse, Intent};
use crate::models::message::{format_history, MessageWithContext};
use crate::providers::base::Provider;
use crate::swaps::base::SwapService;

/// Turns a chat message into either a swap action or a chat reply.
///
/// The model classifies the message, then the matching collaborator is
/// called. An agent holds no per-request state and can be shared across
/// concurrent requests.
pub struct Agent {
    provider: Arc<dyn Provider>,
    swaps: Arc<dyn SwapService>,
}

impl Agent {
    pub fn new(provider: Arc<dyn Provider>, swaps: Arc<dyn SwapService>) -> Self {
        Self { provider, swaps }
    }

    /// Handle one message and produce the JSON payload to send back
    pub async fn reply(&self, request: MessageWithContext) -> AgentResult<Value> {
        let history = format_history(&request.message_history);

        let completion = self
            .provider
            .complete(&request.current_message, &history)
            .await
            .map_err(AgentError::Provider)?;
        let parsed = ExpectedResponse::from_content(completion.content()?)?;
        tracing::info!(?parsed, "parsed model response");

        let intent = parsed.intent()?;
        tracing::info!("{} intent detected", intent);

        let payload = match intent {
            Intent::Swap => self
                .swaps
                .execute_swap(&request.permissions)
                .await
                .map_err(AgentError::Swap)?,
            Intent::GetSwapReceipt => {
                let purchase_id = parsed.receipt_request()?;
                self.swaps
                    .get_swap_receipt(&purchase_id)
                    .await
                    .map_err(AgentError::Swap)?
            }
            Intent::NotSwap => parsed.chat_reply().into(),
        };

        tracing::info!(response = %payload, "sending response");
        Ok(payload)
    }
}
