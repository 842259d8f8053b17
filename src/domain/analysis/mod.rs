//! Analysis domain - sentiment and competition analysis

mod market_analyzer;
mod sentiment;

pub use market_analyzer::MarketAnalyzer;
pub use sentiment::LexiconSentimentScorer;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::errors::AnalysisError;
use crate::shared::types::{CompetitorData, Segment};

/// Text polarity scorer
pub trait SentimentScorer: Send + Sync {
    /// Polarity of `text` in [-1, 1]
    fn score(&self, text: &str) -> Result<f64, AnalysisError>;
}

/// Result of analyzing one cycle's market data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: f64,
    pub competition: BTreeMap<String, CompetitorData>,
    pub segments: Vec<Segment>,
}
