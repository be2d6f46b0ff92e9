use crate::models::{ApiResponse, ChainCost, FeeOptimization};
use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Typed client for a running fee optimizer.
pub struct FeeClient {
    client: Client,
    base_url: String,
}

impl FeeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn optimized_fees(&self) -> Result<FeeOptimization> {
        let response: ApiResponse<FeeOptimization> = self.get("/api/fees").await?;
        Ok(response.data)
    }

    pub async fn chain_fee(&self, chain_id: u64) -> Result<ChainCost> {
        let response: ApiResponse<ChainCost> = self.get(&format!("/api/fees/{}", chain_id)).await?;
        Ok(response.data)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("Request failed with {}: {}", status, error_text);
        }

        response
            .json()
            .await
            .with_context(|| format!("Invalid response from {}", url))
    }
}
