use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gas units of a plain value transfer; every chain is compared at this size.
pub const REFERENCE_GAS_UNITS: f64 = 21_000.0;
pub const WEI_PER_GWEI: f64 = 1e9;
pub const WEI_PER_NATIVE: f64 = 1e18;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainCost {
    pub chain_id: u64,
    pub chain_name: String,
    /// Gas price in gwei.
    pub gas_price: f64,
    /// Cost of a reference transfer in USD.
    pub gas_price_usd: f64,
    pub recommended: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeOptimization {
    pub recommended_chain_name: String,
    /// Savings against the reference chain, in percent.
    pub estimated_savings: f64,
    pub estimated_savings_usd: f64,
    pub all_chain_costs: Vec<ChainCost>,
    pub last_updated: DateTime<Utc>,
}

impl FeeOptimization {
    pub fn recommended(&self) -> Option<&ChainCost> {
        self.all_chain_costs.iter().find(|c| c.recommended)
    }
}

/// Body of `GET /gas/suggestion/{chain}`; only the field we price from.
#[derive(Debug, Deserialize)]
pub struct GasSuggestion {
    pub recommended: SuggestedCost,
}

#[derive(Debug, Deserialize)]
pub struct SuggestedCost {
    /// Full transfer cost in wei, as a decimal string.
    pub amount: String,
}

/// USD cost of `gas_cost_wei` paid in a token worth `native_price_usd`.
pub fn wei_to_usd(gas_cost_wei: f64, native_price_usd: f64) -> f64 {
    gas_cost_wei / WEI_PER_NATIVE * native_price_usd
}
