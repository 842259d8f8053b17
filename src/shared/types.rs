//! Common types used across the pipeline

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Historical price record as delivered by the market data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// Source-specific fields we do not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Market data gathered once per cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub historical: Vec<PriceRecord>,
    /// Real-time snapshot, quote field -> value
    pub real_time: Map<String, Value>,
}

/// Pricing data for a single competitor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorData {
    #[serde(default)]
    pub prices: Vec<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Competitor prices observed inside a segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentCompetitors {
    #[serde(default)]
    pub prices: Vec<f64>,
}

/// Market sub-population priced independently
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitors: Option<SegmentCompetitors>,
}

impl Segment {
    pub fn with_prices(name: &str, prices: Vec<f64>) -> Self {
        Self {
            name: Some(name.to_string()),
            competitors: Some(SegmentCompetitors { prices }),
        }
    }

    /// Competitor prices, empty when the segment carries none
    pub fn competitor_prices(&self) -> &[f64] {
        self.competitors
            .as_ref()
            .map(|c| c.prices.as_slice())
            .unwrap_or(&[])
    }
}

/// Competition payload: an optional `segments` list, every other key is a competitor id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitionSnapshot {
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(flatten)]
    pub competitors: BTreeMap<String, CompetitorData>,
}
