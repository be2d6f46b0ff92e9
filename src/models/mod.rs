pub mod chain;
pub mod gas;
pub mod price;
pub mod response;

pub use chain::*;
pub use gas::*;
pub use price::*;
pub use response::*;
