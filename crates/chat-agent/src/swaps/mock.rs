use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

use super::base::SwapService;

/// A call the mock swap service received
#[derive(Debug, Clone, PartialEq)]
pub enum SwapCall {
    Execute(Value),
    Receipt(String),
}

/// Swap service that echoes its inputs back, or fails every call
#[derive(Default)]
pub struct MockSwapService {
    calls: Mutex<Vec<SwapCall>>,
    failing: bool,
}

impl MockSwapService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<SwapCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SwapService for MockSwapService {
    async fn execute_swap(&self, permissions: &Value) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(SwapCall::Execute(permissions.clone()));
        if self.failing {
            return Err(anyhow!("insufficient allowance"));
        }
        Ok(json!({"status": "success", "swapped": permissions}))
    }

    async fn get_swap_receipt(&self, purchase_id: &str) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(SwapCall::Receipt(purchase_id.to_string()));
        if self.failing {
            return Err(anyhow!("receipt service unavailable"));
        }
        Ok(json!({"status": "success", "receipt": {"purchaseId": purchase_id}}))
    }
}
