//! Metrics for the tournament service
//!
//! Prometheus counters and histograms describing paired rounds and reported
//! results.

pub mod collector;

pub use collector::{MetricsCollector, MetricsTimer, PairingMetrics, ResultMetrics};
