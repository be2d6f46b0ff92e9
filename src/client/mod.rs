pub mod fees;

pub use fees::FeeClient;
