use crate::{
    config::LifiCredentials,
    error::FeeError,
    models::{
        wei_to_usd, ChainCost, ChainSpec, GasSuggestion, TokenPrices, REFERENCE_GAS_UNITS,
        WEI_PER_GWEI,
    },
};
use chrono::Utc;
use ethers::types::U256;

/// LI.FI gas-suggestion client. Prices one reference transfer per chain.
pub struct GasSuggestionService {
    client: reqwest::Client,
    base_url: String,
    credentials: LifiCredentials,
}

impl GasSuggestionService {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, credentials: LifiCredentials) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Cost of a reference transfer on `chain`, never marked recommended.
    ///
    /// When the suggestion cannot be fetched or fails validation the chain's
    /// fallback gwei price is priced instead.
    pub async fn fetch_chain_cost(&self, chain: &ChainSpec, prices: &TokenPrices) -> ChainCost {
        let native_price = prices.price_of(chain.native_token);

        match self.request_gas_cost_wei(chain).await {
            Ok(gas_cost_wei) => {
                let wei = gas_cost_wei.as_u128() as f64;
                let gas_price = wei / REFERENCE_GAS_UNITS / WEI_PER_GWEI;
                let gas_price_usd = wei_to_usd(wei, native_price);
                tracing::info!(
                    "Calculated {}: {:.2} gwei, ${:.6} USD",
                    chain.name,
                    gas_price,
                    gas_price_usd
                );
                ChainCost {
                    chain_id: chain.id(),
                    chain_name: chain.name.to_string(),
                    gas_price,
                    gas_price_usd,
                    recommended: false,
                }
            }
            Err(e) => {
                tracing::warn!("Error fetching gas for {}: {}", chain.name, e);
                fallback_chain_cost(chain, native_price)
            }
        }
    }

    async fn request_gas_cost_wei(&self, chain: &ChainSpec) -> Result<U256, FeeError> {
        let mut request = self
            .client
            .get(format!("{}/gas/suggestion/{}", self.base_url, chain.id()))
            .header("x-lifi-request-id", self.request_id(chain));
        if let Some(key) = &self.credentials.api_key {
            request = request.header("x-lifi-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeeError::UpstreamStatus {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("Gas suggestion for {}: {}", chain.name, body);

        let suggestion: GasSuggestion = serde_json::from_str(&body)
            .map_err(|e| FeeError::MalformedResponse(format!("gas suggestion: {}", e)))?;
        parse_gas_cost_wei(&suggestion.recommended.amount)
    }

    fn request_id(&self, chain: &ChainSpec) -> String {
        format!(
            "{}-{}-{}",
            self.credentials.integrator,
            Utc::now().timestamp_millis(),
            chain.id()
        )
    }
}

/// Parses a wei amount and bounds it to `[0, 1e18]`.
pub fn parse_gas_cost_wei(amount: &str) -> Result<U256, FeeError> {
    let digits = amount.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FeeError::MalformedResponse(format!("gas amount {:?} is not a wei integer", amount)));
    }

    let wei = U256::from_dec_str(digits)
        .map_err(|e| FeeError::MalformedResponse(format!("gas amount {:?}: {}", amount, e)))?;

    if wei > U256::exp10(18) {
        return Err(FeeError::OutOfRange(format!("gas amount {} exceeds 1e18 wei", wei)));
    }

    Ok(wei)
}

pub fn fallback_chain_cost(chain: &ChainSpec, native_price: f64) -> ChainCost {
    let gas_price = chain.fallback_gas_price_gwei();
    let gas_cost_wei = gas_price * WEI_PER_GWEI * REFERENCE_GAS_UNITS;
    let gas_price_usd = wei_to_usd(gas_cost_wei, native_price);
    tracing::info!(
        "Fallback {}: {} gwei, ${:.6} USD",
        chain.name,
        gas_price,
        gas_price_usd
    );

    ChainCost {
        chain_id: chain.id(),
        chain_name: chain.name.to_string(),
        gas_price,
        gas_price_usd,
        recommended: false,
    }
}
