//! Market Optimizer - market intelligence and pricing pipeline
//! Built with Domain-Driven Design principles

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use application::{CycleResult, MarketOptimizer};
pub use config::Config;
pub use domain::analysis::MarketAnalyzer;
pub use domain::market::DataCollector;
pub use domain::strategy::StrategyGenerator;
