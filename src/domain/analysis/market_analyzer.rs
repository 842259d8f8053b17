//! Market analysis: sentiment plus competitive landscape

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::{AnalysisResult, SentimentScorer};
use crate::domain::market::CompetitionDataSource;
use crate::shared::errors::AnalysisError;
use crate::shared::types::MarketData;

/// Analyzes market data to identify sentiment and competition
pub struct MarketAnalyzer {
    scorer: Arc<dyn SentimentScorer>,
    competition: Arc<dyn CompetitionDataSource>,
}

impl MarketAnalyzer {
    pub fn new(scorer: Arc<dyn SentimentScorer>, competition: Arc<dyn CompetitionDataSource>) -> Self {
        Self { scorer, competition }
    }

    pub async fn analyze(&self, market_data: &MarketData) -> Result<AnalysisResult, AnalysisError> {
        let sentiment = self.calculate_sentiment(market_data).map_err(|e| {
            error!("Market analysis failed: {}", e);
            e
        })?;

        let snapshot = self.competition.fetch_competition().await.map_err(|e| {
            error!("Competition analysis failed: {}", e);
            AnalysisError::from(e)
        })?;

        info!(
            "Analysis complete: sentiment={:.3}, competitors={}, segments={}",
            sentiment,
            snapshot.competitors.len(),
            snapshot.segments.len()
        );

        Ok(AnalysisResult {
            sentiment,
            competition: snapshot.competitors,
            segments: snapshot.segments,
        })
    }

    fn calculate_sentiment(&self, data: &MarketData) -> Result<f64, AnalysisError> {
        let texts = tweet_texts(&data.real_time)?;
        if texts.is_empty() {
            debug!("No tweets in snapshot, sentiment is neutral");
            return Ok(0.0);
        }

        let score = self.scorer.score(&texts.join(" "))?;
        if !(-1.0..=1.0).contains(&score) {
            return Err(AnalysisError::ScoreOutOfRange(score));
        }
        Ok(score)
    }
}

/// `text` of every entry in `tweets`, empty when the field is absent
fn tweet_texts(snapshot: &Map<String, Value>) -> Result<Vec<&str>, AnalysisError> {
    let Some(tweets) = snapshot.get("tweets") else {
        return Ok(Vec::new());
    };

    let entries = tweets
        .as_array()
        .ok_or_else(|| AnalysisError::MalformedSnapshot("`tweets` is not an array".to_string()))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, tweet)| {
            tweet.get("text").and_then(Value::as_str).ok_or_else(|| {
                AnalysisError::MalformedSnapshot(format!("tweet {} has no text", i))
            })
        })
        .collect()
}
