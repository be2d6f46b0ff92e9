use std::collections::HashMap;

/// CoinGecko ids queried for native-token prices, paired with the USD price
/// used when the quote service has nothing better.
pub const FALLBACK_PRICES: [(&str, f64); 4] = [
    ("ethereum", 2560.52),
    ("matic-network", 0.184597),
    ("avalanche-2", 18.16),
    ("binancecoin", 661.94),
];

/// USD price per native token, keyed by CoinGecko id.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPrices(HashMap<String, f64>);

impl TokenPrices {
    pub fn fallback() -> Self {
        Self(
            FALLBACK_PRICES
                .iter()
                .map(|(id, price)| (id.to_string(), *price))
                .collect(),
        )
    }

    /// Builds the table from a quote, taking each fixed id's price when it is
    /// present and usable.
    pub fn from_quotes(quotes: &HashMap<String, f64>) -> Self {
        Self(
            FALLBACK_PRICES
                .iter()
                .map(|(id, fallback)| {
                    let price = quotes
                        .get(*id)
                        .copied()
                        .filter(|p| p.is_finite() && *p > 0.0)
                        .unwrap_or(*fallback);
                    (id.to_string(), price)
                })
                .collect(),
        )
    }

    /// Price for a token id; ids outside the fixed set price at zero.
    pub fn price_of(&self, token: &str) -> f64 {
        self.0.get(token).copied().unwrap_or(0.0)
    }

    pub fn ids() -> impl Iterator<Item = &'static str> {
        FALLBACK_PRICES.iter().map(|(id, _)| *id)
    }
}
