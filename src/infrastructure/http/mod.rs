//! HTTP data sources

mod market_api_client;

pub use market_api_client::MarketApiClient;
