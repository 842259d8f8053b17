//! Execution domain - applying generated strategies

mod dry_run_executor;

pub use dry_run_executor::DryRunExecutor;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::strategy::Strategy;
use crate::shared::errors::ExecutionError;

/// Applies generated strategies
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute_strategies(&self, strategies: &[Strategy]) -> Result<ExecutionReport, ExecutionError>;
}

/// Outcome of applying a single strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub segment: usize,
    pub pricing: String,
    pub status: String,
}

/// Executor output, passed through to the cycle result untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub dry_run: bool,
    pub executed: usize,
    pub outcomes: Vec<ExecutionOutcome>,
}
