use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use std::time::Duration;

use super::base::SwapService;

#[derive(Debug, Clone)]
pub struct SwapConfig {
    pub host: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Swap service reached over its REST API
pub struct HttpSwapService {
    client: Client,
    config: SwapConfig,
}

impl HttpSwapService {
    pub fn new(config: SwapConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.host.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(anyhow!("Swap service error: {}: {}", status, body))
        }
    }
}

#[async_trait]
impl SwapService for HttpSwapService {
    async fn execute_swap(&self, permissions: &Value) -> Result<Value> {
        let request = self
            .client
            .post(self.url("/swap"))
            .json(&json!({ "permissions": permissions }));
        self.send(request).await
    }

    async fn get_swap_receipt(&self, purchase_id: &str) -> Result<Value> {
        let path = format!("/receipts/{}", urlencoding::encode(purchase_id));
        let request = self.client.get(self.url(&path));
        self.send(request).await
    }
}
