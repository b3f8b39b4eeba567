pub mod data_client;
pub mod gamma_client;
pub mod sanitize;
pub mod types;

pub use data_client::DataClient;
pub use gamma_client::GammaClient;
pub use sanitize::sanitize_trade;
pub use types::{ApiTrade, GammaMarket};
