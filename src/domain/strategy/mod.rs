//! Strategy domain - per-segment pricing and revenue suggestions

mod pricing;
mod strategy_generator;

pub use pricing::{PricingPolicy, TierRange};
pub use strategy_generator::StrategyGenerator;

use serde::{Deserialize, Serialize};

/// Single dynamic price adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAdjustment {
    pub price_point: f64,
    /// Premium multiplier applied to the competitor mean
    pub multiplier: f64,
}

/// Pricing strategy for one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricingStrategy {
    /// Fixed price bands, used when the segment has no competitor prices
    Tiered { ranges: Vec<TierRange> },
    /// Competitor-mean pricing with a randomized premium
    Dynamic { adjustments: Vec<PriceAdjustment> },
}

impl PricingStrategy {
    pub fn kind(&self) -> &'static str {
        match self {
            PricingStrategy::Tiered { .. } => "tiered",
            PricingStrategy::Dynamic { .. } => "dynamic",
        }
    }
}

/// Suggested revenue stream for a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueStream {
    Subscription,
    UsageBased,
}

impl RevenueStream {
    pub fn for_pricing(pricing: &PricingStrategy) -> Self {
        match pricing {
            PricingStrategy::Tiered { .. } => RevenueStream::Subscription,
            PricingStrategy::Dynamic { .. } => RevenueStream::UsageBased,
        }
    }
}

/// Generated strategy for one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub pricing: PricingStrategy,
    pub revenue_stream: RevenueStream,
}
