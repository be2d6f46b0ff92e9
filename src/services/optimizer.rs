use crate::{
    config::Config,
    error::FeeError,
    models::{find_chain, ChainCost, ChainSpec, FeeOptimization, CHAINS, REFERENCE_CHAIN_NAME},
    services::{GasSuggestionService, TokenPriceService},
};
use chrono::Utc;
use futures::future::join_all;

/// Aggregates prices and gas suggestions into a cheapest-chain recommendation.
pub struct FeeOptimizer {
    prices: TokenPriceService,
    gas: GasSuggestionService,
    chains: &'static [ChainSpec],
}

impl FeeOptimizer {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::new();

        tracing::info!(
            "Fee optimizer initialized for integrator {} ({} chains)",
            config.lifi.integrator,
            CHAINS.len()
        );

        Self {
            prices: TokenPriceService::new(
                client.clone(),
                config.coingecko_api_url.clone(),
                config.coingecko_api_key.clone(),
            ),
            gas: GasSuggestionService::new(client, config.lifi_api_url.clone(), config.lifi.clone()),
            chains: &CHAINS,
        }
    }

    pub fn chains(&self) -> &'static [ChainSpec] {
        self.chains
    }

    /// Prices every configured chain and recommends the cheapest one.
    ///
    /// Upstream failures degrade to fallback figures; this never fails.
    pub async fn get_optimized_fees(&self) -> FeeOptimization {
        let prices = self.prices.fetch_token_prices().await;

        let costs = join_all(
            self.chains
                .iter()
                .map(|chain| self.gas.fetch_chain_cost(chain, &prices)),
        )
        .await;

        let result = rank_chain_costs(costs);
        tracing::info!(
            "Recommended {} saving {:.2}% (${:.6})",
            result.recommended_chain_name,
            result.estimated_savings,
            result.estimated_savings_usd
        );
        result
    }

    /// Cost on a single configured chain.
    pub async fn chain_cost(&self, chain_id: u64) -> Result<ChainCost, FeeError> {
        let chain = find_chain(chain_id).ok_or(FeeError::UnknownChain(chain_id))?;
        let prices = self.prices.fetch_token_prices().await;
        Ok(self.gas.fetch_chain_cost(chain, &prices).await)
    }
}

/// Flags the cheapest chain, measures savings against the reference chain
/// and orders costs ascending. `costs` must be in configured chain order;
/// the first of equally cheap chains wins.
pub fn rank_chain_costs(mut costs: Vec<ChainCost>) -> FeeOptimization {
    let cheapest = costs
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (i, cost)| match best {
            Some((_, min)) if cost.gas_price_usd >= min => best,
            _ => Some((i, cost.gas_price_usd)),
        });

    let Some((cheapest_index, cheapest_usd)) = cheapest else {
        tracing::warn!("No chain costs to rank");
        return FeeOptimization {
            recommended_chain_name: String::new(),
            estimated_savings: 0.0,
            estimated_savings_usd: 0.0,
            all_chain_costs: costs,
            last_updated: Utc::now(),
        };
    };

    for (i, cost) in costs.iter_mut().enumerate() {
        cost.recommended = i == cheapest_index;
    }
    let recommended_chain_name = costs[cheapest_index].chain_name.clone();

    // Without the reference chain, savings are measured against the priciest one.
    let reference_usd = costs
        .iter()
        .find(|c| c.chain_name == REFERENCE_CHAIN_NAME)
        .map(|c| c.gas_price_usd)
        .unwrap_or_else(|| costs.iter().map(|c| c.gas_price_usd).fold(0.0, f64::max));

    let estimated_savings_usd = reference_usd - cheapest_usd;
    let estimated_savings = if reference_usd > 0.0 {
        estimated_savings_usd / reference_usd * 100.0
    } else {
        0.0
    };

    costs.sort_by(|a, b| a.gas_price_usd.total_cmp(&b.gas_price_usd));

    FeeOptimization {
        recommended_chain_name,
        estimated_savings,
        estimated_savings_usd,
        all_chain_costs: costs,
        last_updated: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(id: u64, name: &str, usd: f64) -> ChainCost {
        ChainCost {
            chain_id: id,
            chain_name: name.to_string(),
            gas_price: 1.0,
            gas_price_usd: usd,
            recommended: false,
        }
    }

    #[test]
    fn savings_against_ethereum() {
        let result = rank_chain_costs(vec![cost(1, "Ethereum", 5.0), cost(137, "Polygon", 0.01)]);

        assert_eq!(result.recommended_chain_name, "Polygon");
        assert!((result.estimated_savings_usd - 4.99).abs() < 1e-9);
        assert!((result.estimated_savings - 99.8).abs() < 1e-9);
    }

    #[test]
    fn savings_against_most_expensive_without_ethereum() {
        let result = rank_chain_costs(vec![cost(1001, "A", 3.0), cost(1002, "B", 1.0)]);

        assert_eq!(result.recommended_chain_name, "B");
        assert!((result.estimated_savings_usd - 2.0).abs() < 1e-9);
        assert!((result.estimated_savings - 66.666_666_666).abs() < 1e-6);
    }

    #[test]
    fn zero_reference_means_zero_savings() {
        let result = rank_chain_costs(vec![cost(1, "Ethereum", 0.0), cost(137, "Polygon", 0.0)]);

        assert_eq!(result.estimated_savings, 0.0);
        assert_eq!(result.estimated_savings_usd, 0.0);
        assert!(result.estimated_savings.is_finite());
    }

    #[test]
    fn free_ethereum_is_still_the_reference() {
        let result = rank_chain_costs(vec![cost(1, "Ethereum", 0.0), cost(137, "Polygon", 1.0)]);

        assert_eq!(result.recommended_chain_name, "Ethereum");
        assert_eq!(result.estimated_savings_usd, 0.0);
        assert_eq!(result.estimated_savings, 0.0);
    }

    #[test]
    fn exactly_one_recommended_and_sorted() {
        let result = rank_chain_costs(vec![
            cost(1, "Ethereum", 1.2),
            cost(10, "Optimism", 0.05),
            cost(137, "Polygon", 0.0003),
            cost(42161, "Arbitrum", 0.04),
            cost(43114, "Avalanche", 0.01),
            cost(56, "BSC", 0.07),
        ]);

        let recommended: Vec<_> = result.all_chain_costs.iter().filter(|c| c.recommended).collect();
        assert_eq!(recommended.len(), 1);
        assert_eq!(recommended[0].chain_name, "Polygon");

        let min = result
            .all_chain_costs
            .iter()
            .map(|c| c.gas_price_usd)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(recommended[0].gas_price_usd, min);

        assert!(result
            .all_chain_costs
            .windows(2)
            .all(|w| w[0].gas_price_usd <= w[1].gas_price_usd));
        assert_eq!(result.all_chain_costs.len(), 6);
    }

    #[test]
    fn first_cheapest_wins_ties() {
        let result = rank_chain_costs(vec![
            cost(1, "Ethereum", 2.0),
            cost(10, "Optimism", 0.5),
            cost(42161, "Arbitrum", 0.5),
        ]);

        assert_eq!(result.recommended_chain_name, "Optimism");
        let flagged: Vec<_> = result.all_chain_costs.iter().filter(|c| c.recommended).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].chain_id, 10);
    }

    #[test]
    fn ethereum_reference_used_even_when_not_most_expensive() {
        let result = rank_chain_costs(vec![
            cost(1, "Ethereum", 2.0),
            cost(10, "Optimism", 4.0),
            cost(137, "Polygon", 1.0),
        ]);

        assert!((result.estimated_savings_usd - 1.0).abs() < 1e-9);
        assert!((result.estimated_savings - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_costs_do_not_panic() {
        let result = rank_chain_costs(Vec::new());

        assert!(result.recommended_chain_name.is_empty());
        assert!(result.all_chain_costs.is_empty());
        assert!(result.recommended().is_none());
    }
}
