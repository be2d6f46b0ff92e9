use ethers::types::Chain;

/// A network the optimizer compares, with the CoinGecko id of its native token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSpec {
    pub name: &'static str,
    pub chain: Chain,
    pub native_token: &'static str,
}

impl ChainSpec {
    pub fn id(&self) -> u64 {
        u64::from(self.chain)
    }

    /// Gwei price assumed when the gas-suggestion API gives no usable answer.
    pub fn fallback_gas_price_gwei(&self) -> f64 {
        match self.name {
            "Ethereum" => 20.0,
            "BSC" => 5.0,
            _ => 30.0,
        }
    }
}

/// Display name of the chain savings are measured against.
pub const REFERENCE_CHAIN_NAME: &str = "Ethereum";

pub static CHAINS: [ChainSpec; 6] = [
    ChainSpec { name: "Ethereum", chain: Chain::Mainnet, native_token: "ethereum" },
    ChainSpec { name: "Optimism", chain: Chain::Optimism, native_token: "ethereum" },
    ChainSpec { name: "Polygon", chain: Chain::Polygon, native_token: "matic-network" },
    ChainSpec { name: "Arbitrum", chain: Chain::Arbitrum, native_token: "ethereum" },
    ChainSpec { name: "Avalanche", chain: Chain::Avalanche, native_token: "avalanche-2" },
    ChainSpec { name: "BSC", chain: Chain::BinanceSmartChain, native_token: "binancecoin" },
];

pub fn find_chain(chain_id: u64) -> Option<&'static ChainSpec> {
    CHAINS.iter().find(|spec| spec.id() == chain_id)
}
