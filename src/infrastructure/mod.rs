//! Infrastructure layer - external API clients

pub mod http;

pub use http::MarketApiClient;
