//! Metrics collection using Prometheus
//!
//! Counters and timings for round pairing and result reporting.

use crate::types::GameOutcome;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the tournament service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Pairing-related metrics
    pairing_metrics: PairingMetrics,

    /// Result-related metrics
    result_metrics: ResultMetrics,
}

/// Pairing-related metrics
#[derive(Clone)]
pub struct PairingMetrics {
    /// Total rounds paired
    pub rounds_paired_total: IntCounter,

    /// Total boards with two players
    pub pairings_generated_total: IntCounter,

    /// Total byes awarded
    pub byes_awarded_total: IntCounter,

    /// Rejected pairing requests by reason
    pub pairing_rejections_total: IntCounterVec,

    /// Time spent inside the pairing engine
    pub pairing_duration_seconds: Histogram,
}

/// Result-related metrics
#[derive(Clone)]
pub struct ResultMetrics {
    /// Results recorded by outcome
    pub results_recorded_total: IntCounterVec,

    /// Absolute rating points moved per rated game
    pub rating_delta_points: Histogram,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let pairing_metrics = PairingMetrics::new(&registry)?;
        let result_metrics = ResultMetrics::new(&registry)?;

        Ok(Self {
            registry,
            pairing_metrics,
            result_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Get pairing metrics
    pub fn pairing(&self) -> &PairingMetrics {
        &self.pairing_metrics
    }

    /// Get result metrics
    pub fn results(&self) -> &ResultMetrics {
        &self.result_metrics
    }

    /// Record a successfully paired round
    pub fn record_round_paired(&self, games: usize, byes: usize, duration: Duration) {
        self.pairing_metrics.rounds_paired_total.inc();
        self.pairing_metrics
            .pairings_generated_total
            .inc_by(games as u64);
        self.pairing_metrics.byes_awarded_total.inc_by(byes as u64);
        self.pairing_metrics
            .pairing_duration_seconds
            .observe(duration.as_secs_f64());
    }

    /// Record a refused pairing request
    pub fn record_pairing_rejected(&self, reason: &str) {
        self.pairing_metrics
            .pairing_rejections_total
            .with_label_values(&[reason])
            .inc();
    }

    /// Record a reported game result
    pub fn record_result(&self, outcome: GameOutcome, rating_delta: i32) {
        self.result_metrics
            .results_recorded_total
            .with_label_values(&[outcome.as_str()])
            .inc();
        self.result_metrics
            .rating_delta_points
            .observe(f64::from(rating_delta.abs()));
    }

    /// Render all metrics in the Prometheus text format
    pub fn gather_text(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl PairingMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let rounds_paired_total =
            IntCounter::new("club_swiss_rounds_paired_total", "Total rounds paired")?;
        registry.register(Box::new(rounds_paired_total.clone()))?;

        let pairings_generated_total = IntCounter::new(
            "club_swiss_pairings_generated_total",
            "Total two-player boards generated",
        )?;
        registry.register(Box::new(pairings_generated_total.clone()))?;

        let byes_awarded_total =
            IntCounter::new("club_swiss_byes_awarded_total", "Total byes awarded")?;
        registry.register(Box::new(byes_awarded_total.clone()))?;

        let pairing_rejections_total = IntCounterVec::new(
            Opts::new(
                "club_swiss_pairing_rejections_total",
                "Pairing requests refused by the round state machine",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(pairing_rejections_total.clone()))?;

        let pairing_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "club_swiss_pairing_duration_seconds",
                "Time spent generating a round's pairings",
            )
            .buckets(vec![0.000_01, 0.000_1, 0.001, 0.01, 0.1, 1.0]),
        )?;
        registry.register(Box::new(pairing_duration_seconds.clone()))?;

        Ok(Self {
            rounds_paired_total,
            pairings_generated_total,
            byes_awarded_total,
            pairing_rejections_total,
            pairing_duration_seconds,
        })
    }
}

impl ResultMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let results_recorded_total = IntCounterVec::new(
            Opts::new(
                "club_swiss_results_recorded_total",
                "Game results recorded by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(results_recorded_total.clone()))?;

        let rating_delta_points = Histogram::with_opts(
            HistogramOpts::new(
                "club_swiss_rating_delta_points",
                "Absolute rating change per recorded game: the winner's gain, or white's change on a draw",
            )
            .buckets(vec![0.0, 4.0, 8.0, 16.0, 24.0, 32.0, 64.0]),
        )?;
        registry.register(Box::new(rating_delta_points.clone()))?;

        Ok(Self {
            results_recorded_total,
            rating_delta_points,
        })
    }
}
