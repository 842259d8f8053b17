use serde::Deserialize;
use std::collections::HashMap;
use std::{fs, path::Path};
use tracing::debug;

use crate::domain::strategy::PricingPolicy;
use crate::shared::errors::ConfigError;

/// Environment prefix for API key overrides, e.g. `MARKET_OPTIMIZER_API_KEY_ALPHAVANTAGE`
pub const API_KEY_ENV_PREFIX: &str = "MARKET_OPTIMIZER_API_KEY_";

/// Longest accepted historical window, in days
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsCfg {
    pub historical_data: String,
    pub real_time_data: String,
    pub competition_data: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectionCfg {
    /// Key of `api_keys` used for market data requests
    pub provider: String,
    pub lookback_days: i64,
}

impl Default for CollectionCfg {
    fn default() -> Self {
        Self {
            provider: "alphavantage".to_string(),
            lookback_days: 365,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpCfg {
    pub timeout_secs: u64,
}

impl Default for HttpCfg {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
    pub endpoints: EndpointsCfg,
    #[serde(default)]
    pub collection: CollectionCfg,
    #[serde(default)]
    pub http: HttpCfg,
    #[serde(default)]
    pub pricing: PricingPolicy,
}

impl Config {
    /// Load, apply environment key overrides, and validate
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path.as_ref())?;
        let mut cfg = Self::from_toml_str(&s)?;
        cfg.apply_env_overrides(std::env::vars());
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Replace API keys from `MARKET_OPTIMIZER_API_KEY_<PROVIDER>` variables
    pub fn apply_env_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            if let Some(provider) = name.strip_prefix(API_KEY_ENV_PREFIX) {
                if provider.is_empty() || value.is_empty() {
                    continue;
                }
                debug!("API key for {} taken from environment", provider.to_lowercase());
                self.api_keys.insert(provider.to_lowercase(), value);
            }
        }
    }

    pub fn get_api_keys(&self) -> &HashMap<String, String> {
        &self.api_keys
    }

    pub fn api_key(&self, provider: &str) -> Result<&str, ConfigError> {
        self.api_keys
            .get(provider)
            .map(String::as_str)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(provider.to_string()))
    }

    pub fn historical_data_endpoint(&self) -> &str {
        &self.endpoints.historical_data
    }

    pub fn real_time_data_endpoint(&self) -> &str {
        &self.endpoints.real_time_data
    }

    pub fn competition_data_endpoint(&self) -> &str {
        &self.endpoints.competition_data
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoints = [
            ("historical_data", self.historical_data_endpoint()),
            ("real_time_data", self.real_time_data_endpoint()),
            ("competition_data", self.competition_data_endpoint()),
        ];
        for (name, url) in endpoints {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("endpoint {} is empty", name)));
            }
        }
        if !(1..=MAX_LOOKBACK_DAYS).contains(&self.collection.lookback_days) {
            return Err(ConfigError::Invalid(format!(
                "lookback_days must be within 1..={}, got {}",
                MAX_LOOKBACK_DAYS, self.collection.lookback_days
            )));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid("http timeout_secs must be positive".to_string()));
        }
        self.api_key(&self.collection.provider)?;
        self.pricing
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
