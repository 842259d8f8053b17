//! Pricing policy: tier ladder and premium range

use serde::{Deserialize, Serialize};
use crate::shared::errors::StrategyError;

/// Price band of a tiered strategy; `max_price == None` means open-ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRange {
    pub name: String,
    pub min_price: f64,
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl TierRange {
    pub fn new(name: &str, min_price: f64, max_price: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            min_price,
            max_price,
        }
    }
}

/// Parameters the strategy generator prices with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    pub premium_min: f64,
    pub premium_max: f64,
    /// Fixed seed for reproducible premiums; entropy when absent
    pub seed: Option<u64>,
    pub tiers: Vec<TierRange>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            premium_min: 0.9,
            premium_max: 1.1,
            seed: None,
            tiers: vec![
                TierRange::new("basic", 0.0, Some(10.0)),
                TierRange::new("standard", 10.0, Some(50.0)),
                TierRange::new("premium", 50.0, None),
            ],
        }
    }
}

impl PricingPolicy {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Premiums must be positive and ordered. Tiers must be non-negative,
    /// ascending and non-overlapping, with only the last one open-ended.
    pub fn validate(&self) -> Result<(), StrategyError> {
        if !self.premium_min.is_finite() || !self.premium_max.is_finite() {
            return Err(StrategyError::InvalidPolicy(format!(
                "premium bounds must be finite: [{}, {}]",
                self.premium_min, self.premium_max
            )));
        }
        if self.premium_min <= 0.0 {
            return Err(StrategyError::InvalidPolicy(format!(
                "premium_min must be positive, got {}",
                self.premium_min
            )));
        }
        if self.premium_min > self.premium_max {
            return Err(StrategyError::InvalidPolicy(format!(
                "premium_min {} exceeds premium_max {}",
                self.premium_min, self.premium_max
            )));
        }
        if self.tiers.is_empty() {
            return Err(StrategyError::InvalidPolicy("tier ladder is empty".to_string()));
        }

        let mut previous: Option<&TierRange> = None;
        for tier in &self.tiers {
            if !tier.min_price.is_finite() || tier.min_price < 0.0 {
                return Err(StrategyError::InvalidPolicy(format!(
                    "tier {} has invalid min_price {}",
                    tier.name, tier.min_price
                )));
            }
            if let Some(max) = tier.max_price {
                if !max.is_finite() || max < tier.min_price {
                    return Err(StrategyError::InvalidPolicy(format!(
                        "tier {} has max_price {} below min_price {}",
                        tier.name, max, tier.min_price
                    )));
                }
            }
            if let Some(prev) = previous {
                match prev.max_price {
                    None => {
                        return Err(StrategyError::InvalidPolicy(format!(
                            "open-ended tier {} must be the last",
                            prev.name
                        )))
                    }
                    Some(prev_max) if tier.min_price < prev_max => {
                        return Err(StrategyError::InvalidPolicy(format!(
                            "tier {} starts at {} inside tier {} ending at {}",
                            tier.name, tier.min_price, prev.name, prev_max
                        )))
                    }
                    Some(_) => {}
                }
            }
            previous = Some(tier);
        }
        Ok(())
    }
}
