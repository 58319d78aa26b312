//! Configuration types for arb-streamer

use crate::edge::EdgeThresholds;
use crate::telemetry::LogFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shortest allowed pause between polling cycles
pub const MIN_REFRESH_INTERVAL_SECS: f64 = 5.0;
/// Similarity floor bounds; looser than 50 matches unrelated titles
pub const MIN_SIMILARITY_FLOOR: f64 = 50.0;
pub const MAX_SIMILARITY_FLOOR: f64 = 100.0;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feeds: FeedsConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Venue endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    /// Kalshi markets endpoint
    #[serde(default = "default_kalshi_url")]
    pub kalshi_url: String,

    /// Polymarket Gamma API base URL
    #[serde(default = "default_polymarket_url")]
    pub polymarket_url: String,

    /// Page size requested from Polymarket
    #[serde(default = "default_polymarket_limit")]
    pub polymarket_limit: u32,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_kalshi_url() -> String {
    crate::feed::KALSHI_MARKETS_URL.to_string()
}
fn default_polymarket_url() -> String {
    crate::feed::GAMMA_API_URL.to_string()
}
fn default_polymarket_limit() -> u32 {
    500
}
fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            kalshi_url: default_kalshi_url(),
            polymarket_url: default_polymarket_url(),
            polymarket_limit: default_polymarket_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl FeedsConfig {
    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Polling and matching configuration, as written by the user
///
/// Values are not validated here; [`ScannerConfig::settings`] clamps them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Pause after each cycle (seconds, at least 5)
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: f64,

    /// Minimum title similarity (clamped to 50..=100)
    #[serde(default = "default_min_similarity_score")]
    pub min_similarity_score: f64,

    /// Minimum YES price gap in basis points (at least 0)
    #[serde(default = "default_min_edge_bps")]
    pub min_edge_bps: f64,

    /// Warnings kept in the log before the oldest are dropped
    #[serde(default = "default_max_warnings")]
    pub max_warnings: usize,
}

fn default_refresh_interval_secs() -> f64 {
    10.0
}
fn default_min_similarity_score() -> f64 {
    80.0
}
fn default_min_edge_bps() -> f64 {
    120.0
}
fn default_max_warnings() -> usize {
    50
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            min_similarity_score: default_min_similarity_score(),
            min_edge_bps: default_min_edge_bps(),
            max_warnings: default_max_warnings(),
        }
    }
}

/// Effective scanner settings after clamping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanSettings {
    pub refresh_interval: Duration,
    pub thresholds: EdgeThresholds,
    pub max_warnings: usize,
}

impl ScannerConfig {
    /// Clamp every value into its valid range
    ///
    /// Non-finite numbers fall back to their defaults. A fractional edge
    /// floor rounds up, since edges are whole basis points.
    pub fn settings(&self) -> ScanSettings {
        let min_similarity = if self.min_similarity_score.is_nan() {
            default_min_similarity_score()
        } else {
            self.min_similarity_score
                .clamp(MIN_SIMILARITY_FLOOR, MAX_SIMILARITY_FLOOR)
        };

        let refresh_secs = finite_or(self.refresh_interval_secs, default_refresh_interval_secs)
            .max(MIN_REFRESH_INTERVAL_SECS);
        let min_edge_bps = finite_or(self.min_edge_bps, default_min_edge_bps)
            .ceil()
            .clamp(0.0, f64::from(u32::MAX));

        ScanSettings {
            refresh_interval: Duration::try_from_secs_f64(refresh_secs).unwrap_or(Duration::MAX),
            thresholds: EdgeThresholds {
                min_similarity,
                min_edge_bps: min_edge_bps as u32,
            },
            max_warnings: self.max_warnings.max(1),
        }
    }
}

fn finite_or(value: f64, default: fn() -> f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default()
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScannerConfig::default().settings()
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Default log filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Serve Prometheus metrics on this port when set
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
