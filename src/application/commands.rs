//! CLI commands and handlers
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::application::optimizer::MarketOptimizer;
use crate::config::Config;
use crate::domain::analysis::LexiconSentimentScorer;
use crate::domain::execution::DryRunExecutor;

#[derive(Parser, Debug)]
#[command(name = "market-optimizer")]
#[command(version, about = "Market intelligence pipeline: collect, analyze, price, execute")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run optimization cycles and print each result as JSON
    Run {
        /// Path to config file
        #[arg(short, long, default_value = "Config.toml")]
        config: PathBuf,

        /// Number of cycles to run
        #[arg(short = 'n', long, default_value_t = 1)]
        cycles: u32,

        /// Seconds between cycles
        #[arg(short, long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
        interval_secs: u64,

        /// Fixed pricing seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate the config file and print a summary
    Check {
        /// Path to config file
        #[arg(short, long, default_value = "Config.toml")]
        config: PathBuf,
    },
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(command: Commands) -> Result<()> {
        match command {
            Commands::Run { config, cycles, interval_secs, seed } => {
                Self::execute_run_command(&config, cycles, interval_secs, seed).await
            }
            Commands::Check { config } => Self::execute_check_command(&config),
        }
    }

    async fn execute_run_command(
        config_path: &Path,
        cycles: u32,
        interval_secs: u64,
        seed: Option<u64>,
    ) -> Result<()> {
        let mut config = load_config(config_path)?;
        if let Some(seed) = seed {
            config.pricing.seed = Some(seed);
        }

        let optimizer = MarketOptimizer::from_config(
            &config,
            Arc::new(LexiconSentimentScorer::new()),
            Arc::new(DryRunExecutor),
        )
        .context("failed to build optimizer")?;

        info!("Running {} optimization cycle(s)", cycles);

        let mut failures = 0u32;
        optimizer
            .run_cycles(cycles, Duration::from_secs(interval_secs), |round, result| {
                if !result.is_success() {
                    failures += 1;
                }
                match result.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => warn!("Failed to serialize result of round {}: {}", round, e),
                }
            })
            .await;

        info!("Finished: {} succeeded, {} failed", cycles - failures, failures);
        Ok(())
    }

    fn execute_check_command(config_path: &Path) -> Result<()> {
        let config = load_config(config_path)?;

        println!("Configuration OK: {}", config_path.display());
        println!("  provider:      {}", config.collection.provider);
        println!("  lookback:      {} days", config.collection.lookback_days);
        println!("  historical:    {}", config.historical_data_endpoint());
        println!("  real-time:     {}", config.real_time_data_endpoint());
        println!("  competition:   {}", config.competition_data_endpoint());
        println!(
            "  premium range: [{}, {}]",
            config.pricing.premium_min, config.pricing.premium_max
        );
        println!("  tiers:         {}", config.pricing.tiers.len());
        match config.pricing.seed {
            Some(seed) => println!("  seed:          {}", seed),
            None => println!("  seed:          random"),
        }
        Ok(())
    }
}

fn load_config(path: &Path) -> Result<Config> {
    Config::from_file(path).with_context(|| format!("failed to load {}", path.display()))
}
