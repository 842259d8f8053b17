//! Lexicon-based sentiment scoring

use std::collections::HashMap;

use super::SentimentScorer;
use crate::shared::errors::AnalysisError;

/// Word-weight polarity scorer.
///
/// Each known word contributes its weight; a negation flips and halves the
/// next scored word. The result is the mean contribution clamped to [-1, 1],
/// or 0.0 when no known word appears.
pub struct LexiconSentimentScorer {
    weights: HashMap<&'static str, f64>,
    negations: &'static [&'static str],
}

const WORD_WEIGHTS: &[(&str, f64)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("love", 0.6),
    ("best", 1.0),
    ("strong", 0.43),
    ("growth", 0.5),
    ("profit", 0.6),
    ("gain", 0.5),
    ("gains", 0.5),
    ("bullish", 0.8),
    ("up", 0.2),
    ("rise", 0.4),
    ("cheap", 0.4),
    ("happy", 0.8),
    ("bad", -0.7),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("hate", -0.8),
    ("worst", -1.0),
    ("weak", -0.4),
    ("loss", -0.6),
    ("losses", -0.6),
    ("bearish", -0.8),
    ("down", -0.2),
    ("drop", -0.5),
    ("crash", -0.9),
    ("expensive", -0.5),
    ("overpriced", -0.6),
    ("angry", -0.6),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "isn't", "don't", "doesn't", "won't"];

impl Default for LexiconSentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentimentScorer {
    pub fn new() -> Self {
        Self {
            weights: WORD_WEIGHTS.iter().copied().collect(),
            negations: NEGATIONS,
        }
    }

    pub fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut total = 0.0;
        let mut scored = 0usize;
        let mut negate = false;

        for word in lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty())
        {
            if self.negations.contains(&word) {
                negate = true;
                continue;
            }
            if let Some(&weight) = self.weights.get(word) {
                total += if negate { -0.5 * weight } else { weight };
                scored += 1;
                negate = false;
            }
        }

        if scored == 0 {
            0.0
        } else {
            (total / scored as f64).clamp(-1.0, 1.0)
        }
    }
}

impl SentimentScorer for LexiconSentimentScorer {
    fn score(&self, text: &str) -> Result<f64, AnalysisError> {
        Ok(self.polarity(text))
    }
}
