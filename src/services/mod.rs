pub mod gas;
pub mod optimizer;
pub mod prices;

pub use gas::GasSuggestionService;
pub use optimizer::{rank_chain_costs, FeeOptimizer};
pub use prices::TokenPriceService;
