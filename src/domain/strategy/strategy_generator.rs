//! Strategy generation - one pricing strategy per market segment

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info};

use super::{PriceAdjustment, PricingPolicy, PricingStrategy, RevenueStream, Strategy};
use crate::domain::analysis::AnalysisResult;
use crate::shared::errors::StrategyError;
use crate::shared::types::Segment;
use crate::shared::utils;

/// Turns analysis segments into pricing strategies
#[derive(Debug, Clone)]
pub struct StrategyGenerator {
    policy: PricingPolicy,
}

impl StrategyGenerator {
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Generate strategies with a fresh random source for this call.
    ///
    /// A seeded policy yields the same premiums on every call.
    pub fn generate_strategies(&self, analysis: &AnalysisResult) -> Result<Vec<Strategy>, StrategyError> {
        let mut rng = match self.policy.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        self.generate_with_rng(analysis, &mut rng).map_err(|e| {
            error!("Strategy generation failed: {}", e);
            e
        })
    }

    /// Generate strategies drawing premiums from `rng`
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        analysis: &AnalysisResult,
        rng: &mut R,
    ) -> Result<Vec<Strategy>, StrategyError> {
        self.policy.validate()?;

        let strategies = analysis
            .segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                let pricing = self.pricing_for_segment(index, segment, rng)?;
                let revenue_stream = RevenueStream::for_pricing(&pricing);
                debug!(
                    "Segment {} ({}): {} pricing, {:?} revenue",
                    index,
                    segment.name.as_deref().unwrap_or("unnamed"),
                    pricing.kind(),
                    revenue_stream
                );
                Ok(Strategy { pricing, revenue_stream })
            })
            .collect::<Result<Vec<_>, StrategyError>>()?;

        info!("Generated {} strategies", strategies.len());
        Ok(strategies)
    }

    fn pricing_for_segment<R: Rng + ?Sized>(
        &self,
        index: usize,
        segment: &Segment,
        rng: &mut R,
    ) -> Result<PricingStrategy, StrategyError> {
        let prices = segment.competitor_prices();

        if let Some(&price) = prices.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(StrategyError::InvalidPrice { segment: index, price });
        }

        let Some(average_price) = utils::mean(prices) else {
            return Ok(PricingStrategy::Tiered {
                ranges: self.policy.tiers.clone(),
            });
        };

        let multiplier = rng.gen_range(self.policy.premium_min..=self.policy.premium_max);
        let price_point = average_price * multiplier;
        if !price_point.is_finite() {
            return Err(StrategyError::PriceOverflow { segment: index });
        }

        Ok(PricingStrategy::Dynamic {
            adjustments: vec![PriceAdjustment { price_point, multiplier }],
        })
    }
}
