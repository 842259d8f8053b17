//! Executor that only records what it would apply

use async_trait::async_trait;
use tracing::info;

use super::{ExecutionOutcome, ExecutionReport, Executor};
use crate::domain::strategy::{PricingStrategy, Strategy};
use crate::shared::errors::ExecutionError;

pub struct DryRunExecutor;

#[async_trait]
impl Executor for DryRunExecutor {
    /// Rejects the batch if any strategy has nothing to apply or a non-finite price
    async fn execute_strategies(&self, strategies: &[Strategy]) -> Result<ExecutionReport, ExecutionError> {
        let outcomes = strategies
            .iter()
            .enumerate()
            .map(|(segment, strategy)| {
                match &strategy.pricing {
                    PricingStrategy::Tiered { ranges } => {
                        if ranges.is_empty() {
                            return Err(ExecutionError::Rejected(format!(
                                "segment {} has no price tiers",
                                segment
                            )));
                        }
                        info!("Segment {}: would apply {} price tiers", segment, ranges.len());
                    }
                    PricingStrategy::Dynamic { adjustments } => {
                        if adjustments.is_empty() {
                            return Err(ExecutionError::Rejected(format!(
                                "segment {} has no price adjustments",
                                segment
                            )));
                        }
                        for adjustment in adjustments {
                            if !adjustment.price_point.is_finite() {
                                return Err(ExecutionError::Rejected(format!(
                                    "segment {} has non-finite price point {}",
                                    segment, adjustment.price_point
                                )));
                            }
                            info!(
                                "Segment {}: would reprice to {:.2} (x{:.3})",
                                segment, adjustment.price_point, adjustment.multiplier
                            );
                        }
                    }
                }
                Ok(ExecutionOutcome {
                    segment,
                    pricing: strategy.pricing.kind().to_string(),
                    status: "simulated".to_string(),
                })
            })
            .collect::<Result<Vec<_>, ExecutionError>>()?;

        Ok(ExecutionReport {
            dry_run: true,
            executed: outcomes.len(),
            outcomes,
        })
    }
}
