use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The service that actually moves tokens.
///
/// Results are opaque to the agent and are handed back to the caller as they
/// come.
#[async_trait]
pub trait SwapService: Send + Sync {
    /// Run a swap under the permissions the user granted in the UI
    async fn execute_swap(&self, permissions: &Value) -> Result<Value>;

    /// Look up the receipt of an earlier swap
    async fn get_swap_receipt(&self, purchase_id: &str) -> Result<Value>;
}
