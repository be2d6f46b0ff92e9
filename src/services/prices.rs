use crate::{error::FeeError, models::TokenPrices};
use std::collections::HashMap;

/// CoinGecko `simple/price` client for native-token USD quotes.
pub struct TokenPriceService {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TokenPriceService {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Returns USD prices for every native token. Any upstream failure is
    /// logged and answered with the fallback table.
    pub async fn fetch_token_prices(&self) -> TokenPrices {
        match self.request_quotes().await {
            Ok(quotes) => {
                tracing::debug!(?quotes, "Token prices");
                TokenPrices::from_quotes(&quotes)
            }
            Err(e) => {
                tracing::error!("Error fetching token prices: {}, using fallback prices", e);
                TokenPrices::fallback()
            }
        }
    }

    async fn request_quotes(&self) -> Result<HashMap<String, f64>, FeeError> {
        let ids = TokenPrices::ids().collect::<Vec<_>>().join(",");

        let mut request = self
            .client
            .get(format!("{}/simple/price", self.base_url))
            .query(&[("ids", ids.as_str()), ("vs_currencies", "usd")]);
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
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
        parse_quotes(&body)
    }
}

/// Extracts `{id: {usd: price}}` pairs. Entries without a numeric `usd`
/// field are skipped; a body that is not a JSON object is rejected.
fn parse_quotes(body: &str) -> Result<HashMap<String, f64>, FeeError> {
    let data: HashMap<String, serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| FeeError::MalformedResponse(format!("price quote: {}", e)))?;

    Ok(data
        .into_iter()
        .filter_map(|(id, quote)| quote.get("usd").and_then(|usd| usd.as_f64()).map(|usd| (id, usd)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn service(url: &str) -> TokenPriceService {
        TokenPriceService::new(reqwest::Client::new(), url, None)
    }

    #[test]
    fn parse_skips_entries_without_usd() {
        let quotes = parse_quotes(r#"{"ethereum":{"usd":3100.5},"binancecoin":{"eur":600}}"#).unwrap();
        assert_eq!(quotes.get("ethereum"), Some(&3100.5));
        assert!(!quotes.contains_key("binancecoin"));
    }

    #[test]
    fn parse_rejects_non_object_body() {
        assert!(matches!(parse_quotes("[1,2,3]"), Err(FeeError::MalformedResponse(_))));
        assert!(matches!(parse_quotes("<html>"), Err(FeeError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn uses_live_prices_when_available() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "ids".into(),
                    "ethereum,matic-network,avalanche-2,binancecoin".into(),
                ),
                Matcher::UrlEncoded("vs_currencies".into(), "usd".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"ethereum":{"usd":3000.0},"matic-network":{"usd":0.5},"avalanche-2":{"usd":25.0},"binancecoin":{"usd":600.0}}"#,
            )
            .create_async()
            .await;

        let prices = service(&server.url()).fetch_token_prices().await;

        mock.assert_async().await;
        assert_eq!(prices.price_of("ethereum"), 3000.0);
        assert_eq!(prices.price_of("matic-network"), 0.5);
        assert_eq!(prices.price_of("avalanche-2"), 25.0);
        assert_eq!(prices.price_of("binancecoin"), 600.0);
    }

    #[tokio::test]
    async fn missing_tokens_fall_back_individually() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"ethereum":{"usd":3000.0}}"#)
            .create_async()
            .await;

        let prices = service(&server.url()).fetch_token_prices().await;

        assert_eq!(prices.price_of("ethereum"), 3000.0);
        assert_eq!(prices.price_of("matic-network"), 0.184597);
        assert_eq!(prices.price_of("avalanche-2"), 18.16);
        assert_eq!(prices.price_of("binancecoin"), 661.94);
    }

    #[tokio::test]
    async fn error_status_returns_fallback_table() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body(r#"{"ethereum":{"usd":1.0}}"#)
            .create_async()
            .await;

        let prices = service(&server.url()).fetch_token_prices().await;
        assert_eq!(prices, TokenPrices::fallback());
    }

    #[tokio::test]
    async fn malformed_body_returns_fallback_table() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let prices = service(&server.url()).fetch_token_prices().await;
        assert_eq!(prices, TokenPrices::fallback());
    }

    #[tokio::test]
    async fn unreachable_service_returns_fallback_table() {
        let prices = service("http://127.0.0.1:9").fetch_token_prices().await;
        assert_eq!(prices, TokenPrices::fallback());
    }

    #[tokio::test]
    async fn sends_api_key_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .match_header("x-cg-demo-api-key", "demo-key")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let service =
            TokenPriceService::new(reqwest::Client::new(), server.url(), Some("demo-key".into()));
        service.fetch_token_prices().await;

        mock.assert_async().await;
    }
}
