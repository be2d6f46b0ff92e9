use anyhow::{bail, Context, Result};
use std::str::FromStr;

pub const DEFAULT_LIFI_API_URL: &str = "https://li.quest/v1";
pub const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_INTEGRATOR_ID: &str = "fee-optimizer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testnet,
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testnet" | "test" => Ok(Environment::Testnet),
            "production" | "prod" => Ok(Environment::Production),
            _ => bail!("Unknown environment: {}", s),
        }
    }
}

/// Credentials handed to the LI.FI gas-suggestion API.
///
/// The integrator id prefixes every request id; the key is forwarded as-is.
#[derive(Debug, Clone)]
pub struct LifiCredentials {
    pub integrator: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,

    // LI.FI (gas suggestions)
    pub lifi_api_url: String,
    pub lifi: LifiCredentials,

    // CoinGecko (token prices)
    pub coingecko_api_url: String,
    pub coingecko_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let environment = std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .parse()?;

        let config = Self {
            environment,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT")?,

            lifi_api_url: std::env::var("LIFI_API_URL")
                .unwrap_or_else(|_| DEFAULT_LIFI_API_URL.to_string()),
            lifi: LifiCredentials {
                integrator: std::env::var("LIFI_INTEGRATOR_ID")
                    .unwrap_or_else(|_| DEFAULT_INTEGRATOR_ID.to_string()),
                api_key: non_empty_var("LIFI_API_KEY"),
            },

            coingecko_api_url: std::env::var("COINGECKO_API_URL")
                .unwrap_or_else(|_| DEFAULT_COINGECKO_API_URL.to_string()),
            coingecko_api_key: non_empty_var("COINGECKO_API_KEY"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Configuration pointing both upstream APIs at the given base URLs.
    pub fn with_endpoints(lifi_api_url: impl Into<String>, coingecko_api_url: impl Into<String>) -> Self {
        Self {
            environment: Environment::Development,
            host: "127.0.0.1".to_string(),
            port: 8080,
            lifi_api_url: lifi_api_url.into(),
            lifi: LifiCredentials {
                integrator: DEFAULT_INTEGRATOR_ID.to_string(),
                api_key: None,
            },
            coingecko_api_url: coingecko_api_url.into(),
            coingecko_api_key: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.lifi_api_url.starts_with("http") {
            bail!("LIFI_API_URL must be HTTP(S) URL");
        }
        if !self.coingecko_api_url.starts_with("http") {
            bail!("COINGECKO_API_URL must be HTTP(S) URL");
        }
        if self.lifi.integrator.trim().is_empty() {
            bail!("LIFI_INTEGRATOR_ID must not be empty");
        }

        tracing::info!(
            "Configuration validated for {:?} environment",
            self.environment
        );

        Ok(())
    }
}

fn non_empty_var(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}
