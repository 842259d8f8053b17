use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{Config, EndpointsCfg};
use crate::domain::market::{CompetitionDataSource, MarketDataSource};
use crate::shared::errors::{ConfigError, FetchError};
use crate::shared::types::{CompetitionSnapshot, PriceRecord};

/// Historical endpoint body
#[derive(Debug, Deserialize)]
struct HistoricalResponse {
    data: Vec<PriceRecord>,
}

/// Market and competition API client over plain HTTP GET
pub struct MarketApiClient {
    http_client: Client,
    endpoints: EndpointsCfg,
}

impl MarketApiClient {
    pub fn new(endpoints: EndpointsCfg, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(http_client, endpoints))
    }

    pub fn with_http_client(http_client: Client, endpoints: EndpointsCfg) -> Self {
        Self { http_client, endpoints }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            config.endpoints.clone(),
            Duration::from_secs(config.http.timeout_secs),
        )
        .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        debug!("GET {}", endpoint);

        let request_error = |source: reqwest::Error| FetchError::Request {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = self
            .http_client
            .get(endpoint)
            .query(query)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        if !status.is_success() {
            warn!("{} returned status {}", endpoint, status);
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl MarketDataSource for MarketApiClient {
    async fn fetch_historical(
        &self,
        api_key: &str,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<Vec<PriceRecord>, FetchError> {
        let query = [
            ("api_key", api_key.to_string()),
            ("start_date", start_date.to_rfc3339()),
            ("end_date", end_date.to_rfc3339()),
        ];
        let response: HistoricalResponse = self.get_json(&self.endpoints.historical_data, &query).await?;
        Ok(response.data)
    }

    async fn fetch_real_time(&self, api_key: &str) -> Result<Map<String, Value>, FetchError> {
        let query = [("api_key", api_key.to_string())];
        self.get_json(&self.endpoints.real_time_data, &query).await
    }
}

#[async_trait]
impl CompetitionDataSource for MarketApiClient {
    async fn fetch_competition(&self) -> Result<CompetitionSnapshot, FetchError> {
        self.get_json(&self.endpoints.competition_data, &[]).await
    }
}
