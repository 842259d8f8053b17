//! Per-cycle market data collection

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{error, info};

use super::MarketDataSource;
use crate::config::Config;
use crate::shared::errors::{ConfigError, FetchError};
use crate::shared::types::MarketData;

/// Collects historical and real-time data for one cycle
pub struct DataCollector {
    source: Arc<dyn MarketDataSource>,
    api_key: String,
    lookback_days: i64,
}

impl DataCollector {
    pub fn new(source: Arc<dyn MarketDataSource>, api_key: String, lookback_days: i64) -> Self {
        Self {
            source,
            api_key,
            lookback_days,
        }
    }

    /// Resolve the provider key and lookback window from configuration
    pub fn from_config(source: Arc<dyn MarketDataSource>, config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.api_key(&config.collection.provider)?.to_string();
        Ok(Self::new(source, api_key, config.collection.lookback_days))
    }

    /// Fetch historical data, then the real-time snapshot
    pub async fn collect(&self) -> Result<MarketData, FetchError> {
        let end_date = Utc::now();
        let start_date = self.window_start(end_date).map_err(|e| {
            error!("Data collection failed: {}", e);
            e
        })?;

        let historical = self
            .source
            .fetch_historical(&self.api_key, start_date, end_date)
            .await
            .map_err(|e| {
                error!("Data collection failed: {}", e);
                e
            })?;
        info!("Fetched {} historical records", historical.len());

        let real_time = self.source.fetch_real_time(&self.api_key).await.map_err(|e| {
            error!("Data collection failed: {}", e);
            e
        })?;

        Ok(MarketData { historical, real_time })
    }

    fn window_start(&self, end_date: DateTime<Utc>) -> Result<DateTime<Utc>, FetchError> {
        Some(self.lookback_days)
            .filter(|days| *days > 0)
            .and_then(Duration::try_days)
            .and_then(|lookback| end_date.checked_sub_signed(lookback))
            .ok_or(FetchError::InvalidWindow {
                lookback_days: self.lookback_days,
            })
    }
}
