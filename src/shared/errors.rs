//! Error handling for the pipeline

use thiserror::Error;

/// Data-source errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {endpoint} failed with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("Lookback of {lookback_days} days does not fit the calendar")]
    InvalidWindow { lookback_days: i64 },
}

/// Analysis errors
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Malformed real-time snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Sentiment score out of range: {0}")]
    ScoreOutOfRange(f64),

    #[error("Sentiment scorer failed: {0}")]
    Scorer(String),

    #[error(transparent)]
    Competition(#[from] FetchError),
}

/// Strategy generation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("Invalid competitor price {price} in segment {segment}")]
    InvalidPrice { segment: usize, price: f64 },

    #[error("Price point for segment {segment} is not finite")]
    PriceOverflow { segment: usize },

    #[error("Invalid pricing policy: {0}")]
    InvalidPolicy(String),
}

/// Execution errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("Strategy rejected: {0}")]
    Rejected(String),

    #[error("Execution failed: {0}")]
    Failed(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing API key for provider: {0}")]
    MissingApiKey(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Pipeline stage that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Collection,
    Analysis,
    Strategy,
    Execution,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Collection => "collection",
            Stage::Analysis => "analysis",
            Stage::Strategy => "strategy",
            Stage::Execution => "execution",
        }
    }
}

/// Any failure of a single optimization cycle
#[derive(Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Collection(#[from] FetchError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl CycleError {
    pub fn stage(&self) -> Stage {
        match self {
            CycleError::Collection(_) => Stage::Collection,
            CycleError::Analysis(_) => Stage::Analysis,
            CycleError::Strategy(_) => Stage::Strategy,
            CycleError::Execution(_) => Stage::Execution,
        }
    }
}
