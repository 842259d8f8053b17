//! Market domain - data source contracts and per-cycle collection

mod data_collector;

pub use data_collector::DataCollector;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::shared::errors::FetchError;
use crate::shared::types::{CompetitionSnapshot, PriceRecord};

/// Source of historical and real-time market data
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Historical price records between `start_date` and `end_date`
    async fn fetch_historical(
        &self,
        api_key: &str,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<Vec<PriceRecord>, FetchError>;

    /// Current quote snapshot
    async fn fetch_real_time(&self, api_key: &str) -> Result<Map<String, Value>, FetchError>;
}

/// Source of current competitor pricing
#[async_trait]
pub trait CompetitionDataSource: Send + Sync {
    async fn fetch_competition(&self) -> Result<CompetitionSnapshot, FetchError>;
}
