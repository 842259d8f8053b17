//! Application layer - use cases and services

pub mod commands;
pub mod optimizer;

pub use commands::{Cli, Commands, CommandExecutor};
pub use optimizer::{CycleResult, MarketOptimizer};
