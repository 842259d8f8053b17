//! Domain layer - core business logic and entities

pub mod analysis;
pub mod execution;
pub mod market;
pub mod strategy;
