//! Optimization cycle orchestration

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, info_span, Instrument};

use crate::config::Config;
use crate::domain::analysis::{MarketAnalyzer, SentimentScorer};
use crate::domain::execution::{ExecutionReport, Executor};
use crate::domain::market::DataCollector;
use crate::domain::strategy::StrategyGenerator;
use crate::infrastructure::MarketApiClient;
use crate::shared::errors::{ConfigError, CycleError};
use crate::shared::utils;

/// Outcome of one optimization cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CycleResult {
    Success { optimization_results: ExecutionReport },
    Error { message: String },
}

impl CycleResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CycleResult::Success { .. })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Runs collect -> analyze -> generate -> execute, one stage after another
pub struct MarketOptimizer {
    collector: DataCollector,
    analyzer: MarketAnalyzer,
    generator: StrategyGenerator,
    executor: Arc<dyn Executor>,
}

impl MarketOptimizer {
    pub fn new(
        collector: DataCollector,
        analyzer: MarketAnalyzer,
        generator: StrategyGenerator,
        executor: Arc<dyn Executor>,
    ) -> Self {
        Self {
            collector,
            analyzer,
            generator,
            executor,
        }
    }

    /// Wire the HTTP client for market and competition data
    pub fn from_config(
        config: &Config,
        scorer: Arc<dyn SentimentScorer>,
        executor: Arc<dyn Executor>,
    ) -> Result<Self, ConfigError> {
        let client = Arc::new(MarketApiClient::from_config(config)?);
        let collector = DataCollector::from_config(client.clone(), config)?;
        let analyzer = MarketAnalyzer::new(scorer, client);
        let generator = StrategyGenerator::new(config.pricing.clone());

        Ok(Self::new(collector, analyzer, generator, executor))
    }

    /// Run one cycle. Failures come back as `CycleResult::Error`, never as `Err`.
    pub async fn run_cycle(&self) -> CycleResult {
        let cycle_id = utils::generate_id();

        async {
            match self.try_cycle().await {
                Ok(report) => {
                    info!("Optimization cycle finished: {} strategies executed", report.executed);
                    CycleResult::Success {
                        optimization_results: report,
                    }
                }
                Err(e) => {
                    let stage = e.stage().as_str();
                    error!(stage = stage, "Optimization cycle failed: {}", e);
                    let message = e.to_string();
                    CycleResult::Error {
                        message: if message.is_empty() {
                            format!("{} stage failed", stage)
                        } else {
                            message
                        },
                    }
                }
            }
        }
        .instrument(info_span!("cycle", cycle_id = %cycle_id))
        .await
    }

    /// Run `count` cycles, `interval` apart. A zero interval runs them back to back.
    pub async fn run_cycles<F>(&self, count: u32, interval: Duration, mut on_result: F)
    where
        F: FnMut(u32, &CycleResult),
    {
        let mut ticker = (!interval.is_zero()).then(|| tokio::time::interval(interval));

        for round in 1..=count {
            if let Some(ticker) = ticker.as_mut() {
                ticker.tick().await;
            }
            info!("Round {}/{}", round, count);
            let result = self.run_cycle().await;
            on_result(round, &result);
        }
    }

    async fn try_cycle(&self) -> Result<ExecutionReport, CycleError> {
        info!("Starting data collection...");
        let market_data = self.collector.collect().await?;

        info!("Analyzing market trends...");
        let analysis = self.analyzer.analyze(&market_data).await?;

        info!("Generating optimization strategies...");
        let strategies = self.generator.generate_strategies(&analysis)?;

        info!("Executing selected strategies...");
        let report = self.executor.execute_strategies(&strategies).await?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::{json, Map, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::domain::execution::ExecutionOutcome;
    use crate::domain::strategy::{PricingPolicy, PricingStrategy, Strategy};
    use crate::shared::errors::{AnalysisError, ExecutionError, FetchError};
    use crate::shared::types::{CompetitionSnapshot, PriceRecord, Segment};

    fn unavailable(endpoint: &str) -> FetchError {
        FetchError::Status {
            endpoint: endpoint.to_string(),
            status: 500,
            body: "unavailable".to_string(),
        }
    }

    #[derive(Default)]
    struct MockMarket {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl crate::domain::market::MarketDataSource for MockMarket {
        async fn fetch_historical(
            &self,
            _api_key: &str,
            _start_date: DateTime<Utc>,
            _end_date: DateTime<Utc>,
        ) -> Result<Vec<PriceRecord>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(unavailable("historical"));
            }
            Ok(vec![])
        }

        async fn fetch_real_time(&self, _api_key: &str) -> Result<Map<String, Value>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let snapshot = json!({ "tweets": [{ "text": "great value" }, { "text": "love it" }] });
            Ok(snapshot.as_object().cloned().unwrap_or_default())
        }
    }

    #[derive(Default)]
    struct MockCompetition {
        calls: AtomicUsize,
        fail: bool,
        segments: Vec<Segment>,
    }

    #[async_trait]
    impl crate::domain::market::CompetitionDataSource for MockCompetition {
        async fn fetch_competition(&self) -> Result<CompetitionSnapshot, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(unavailable("competition"));
            }
            Ok(CompetitionSnapshot {
                segments: self.segments.clone(),
                ..Default::default()
            })
        }
    }

    struct FixedScorer;

    impl SentimentScorer for FixedScorer {
        fn score(&self, _text: &str) -> Result<f64, AnalysisError> {
            Ok(0.5)
        }
    }

    #[derive(Default)]
    struct MockExecutor {
        calls: AtomicUsize,
        fail: bool,
        received: Mutex<Vec<Strategy>>,
    }

    #[async_trait]
    impl Executor for MockExecutor {
        async fn execute_strategies(&self, strategies: &[Strategy]) -> Result<ExecutionReport, ExecutionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ExecutionError::Failed("venue rejected order".to_string()));
            }
            *self.received.lock().unwrap() = strategies.to_vec();

            let outcomes = strategies
                .iter()
                .enumerate()
                .map(|(segment, s)| ExecutionOutcome {
                    segment,
                    pricing: s.pricing.kind().to_string(),
                    status: match &s.pricing {
                        PricingStrategy::Dynamic { adjustments } => {
                            format!("applied@{:.6}", adjustments[0].price_point)
                        }
                        PricingStrategy::Tiered { ranges } => format!("applied {} tiers", ranges.len()),
                    },
                })
                .collect::<Vec<_>>();

            Ok(ExecutionReport {
                dry_run: false,
                executed: outcomes.len(),
                outcomes,
            })
        }
    }

    struct Harness {
        market: Arc<MockMarket>,
        competition: Arc<MockCompetition>,
        executor: Arc<MockExecutor>,
        optimizer: MarketOptimizer,
    }

    fn default_segments() -> Vec<Segment> {
        vec![
            Segment::with_prices("retail", vec![100.0, 110.0, 90.0]),
            Segment::default(),
        ]
    }

    fn harness(market: MockMarket, competition: MockCompetition, executor: MockExecutor) -> Harness {
        let market = Arc::new(market);
        let competition = Arc::new(competition);
        let executor = Arc::new(executor);

        let optimizer = MarketOptimizer::new(
            DataCollector::new(market.clone(), "test-key".to_string(), 365),
            MarketAnalyzer::new(Arc::new(FixedScorer), competition.clone()),
            StrategyGenerator::new(PricingPolicy::default().with_seed(7)),
            executor.clone(),
        );

        Harness {
            market,
            competition,
            executor,
            optimizer,
        }
    }

    fn healthy() -> Harness {
        harness(
            MockMarket::default(),
            MockCompetition {
                segments: default_segments(),
                ..Default::default()
            },
            MockExecutor::default(),
        )
    }

    fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn test_success_returns_executor_output_unchanged() {
        let h = healthy();

        let result = h.optimizer.run_cycle().await;

        let optimization_results = match result {
            CycleResult::Success { optimization_results } => optimization_results,
            other => panic!("expected success, got {:?}", other),
        };
        assert!(!optimization_results.dry_run);
        assert_eq!(optimization_results.executed, 2);
        assert_eq!(optimization_results.outcomes[0].pricing, "dynamic");
        assert_eq!(optimization_results.outcomes[1].pricing, "tiered");
        assert_eq!(h.executor.received.lock().unwrap().len(), 2);
        assert_eq!(calls(&h.market.calls), 2);
        assert_eq!(calls(&h.competition.calls), 1);
        assert_eq!(calls(&h.executor.calls), 1);
    }

    #[tokio::test]
    async fn test_collection_failure_stops_pipeline() {
        let h = harness(
            MockMarket { fail: true, ..Default::default() },
            MockCompetition { segments: default_segments(), ..Default::default() },
            MockExecutor::default(),
        );

        let result = h.optimizer.run_cycle().await;

        match result {
            CycleResult::Error { message } => assert!(message.contains("historical")),
            other => panic!("expected error, got {:?}", other),
        }
        assert_eq!(calls(&h.market.calls), 1);
        assert_eq!(calls(&h.competition.calls), 0);
        assert_eq!(calls(&h.executor.calls), 0);
    }

    #[tokio::test]
    async fn test_analysis_failure_stops_pipeline() {
        let h = harness(
            MockMarket::default(),
            MockCompetition { fail: true, ..Default::default() },
            MockExecutor::default(),
        );

        let result = h.optimizer.run_cycle().await;

        match result {
            CycleResult::Error { message } => assert!(message.contains("competition")),
            other => panic!("expected error, got {:?}", other),
        }
        assert_eq!(calls(&h.competition.calls), 1);
        assert_eq!(calls(&h.executor.calls), 0);
    }

    #[tokio::test]
    async fn test_strategy_failure_stops_pipeline() {
        let h = harness(
            MockMarket::default(),
            MockCompetition {
                segments: vec![Segment::with_prices("broken", vec![f64::INFINITY])],
                ..Default::default()
            },
            MockExecutor::default(),
        );

        let result = h.optimizer.run_cycle().await;

        match result {
            CycleResult::Error { message } => {
                assert!(!message.is_empty());
                assert!(message.contains("segment 0"));
            }
            other => panic!("expected error, got {:?}", other),
        }
        assert_eq!(calls(&h.executor.calls), 0);
    }

    #[tokio::test]
    async fn test_execution_failure_reported() {
        let h = harness(
            MockMarket::default(),
            MockCompetition { segments: default_segments(), ..Default::default() },
            MockExecutor { fail: true, ..Default::default() },
        );

        let result = h.optimizer.run_cycle().await;

        assert_eq!(
            result,
            CycleResult::Error {
                message: "Execution failed: venue rejected order".to_string()
            }
        );
        assert_eq!(calls(&h.executor.calls), 1);
    }

    #[tokio::test]
    async fn test_seeded_cycles_are_identical() {
        let h = healthy();

        let first = h.optimizer.run_cycle().await;
        let second = h.optimizer.run_cycle().await;

        assert!(first.is_success());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_run_cycles_reports_each_round() {
        let h = healthy();
        let mut rounds = Vec::new();

        h.optimizer
            .run_cycles(3, Duration::from_millis(1), |round, result| {
                rounds.push((round, result.is_success()));
            })
            .await;

        assert_eq!(rounds, vec![(1, true), (2, true), (3, true)]);
        assert_eq!(calls(&h.executor.calls), 3);
    }

    #[tokio::test]
    async fn test_run_cycles_with_zero_interval() {
        let h = healthy();
        let mut rounds = Vec::new();

        h.optimizer
            .run_cycles(2, Duration::ZERO, |round, result| {
                rounds.push((round, result.is_success()));
            })
            .await;

        assert_eq!(rounds, vec![(1, true), (2, true)]);
    }

    #[test]
    fn test_cycle_result_json_shape() {
        let success = serde_json::to_value(CycleResult::Success {
            optimization_results: ExecutionReport::default(),
        })
        .unwrap();
        assert_eq!(success["status"], json!("success"));
        assert_eq!(success["optimization_results"]["executed"], json!(0));

        let failure = serde_json::to_value(CycleResult::Error {
            message: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(failure, json!({ "status": "error", "message": "boom" }));
    }
}
