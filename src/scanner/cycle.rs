//! One polling cycle: fetch, normalize, match, rank

use super::{Warning, WarningLog};
use crate::config::{Config, ScanSettings};
use crate::edge::{EdgeEngine, RankedEdge};
use crate::feed::{FeedError, GammaClient, KalshiClient, MarketFeed};
use crate::market::{normalize_all, Market, Venue};
use crate::telemetry::{self, GaugeMetric, LatencyMetric};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Progress across cycles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanStatus {
    /// Completion time of the most recent cycle
    pub last_update: Option<DateTime<Utc>>,
    /// Ranked edges found by the most recent cycle
    pub edge_count: usize,
    /// Cycles completed since the scanner was created
    pub cycles: u64,
}

/// Everything one cycle produced, for presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// Normalized Kalshi markets, including unquoted ones
    pub kalshi: Vec<Market>,
    /// Normalized Polymarket markets, including unquoted ones
    pub polymarket: Vec<Market>,
    /// Ranked edges, widest first
    pub edges: Vec<RankedEdge>,
    /// Venues whose fetch failed this cycle
    pub failed_venues: Vec<Venue>,
    /// Warning history, newest first
    pub warnings: Vec<Warning>,
    pub status: ScanStatus,
}

/// Runs cycles against a pair of feeds
pub struct Scanner {
    kalshi: Box<dyn MarketFeed>,
    polymarket: Box<dyn MarketFeed>,
    engine: EdgeEngine,
    warnings: WarningLog,
    status: ScanStatus,
}

impl Scanner {
    /// Create a scanner over the given feeds
    pub fn new(
        kalshi: Box<dyn MarketFeed>,
        polymarket: Box<dyn MarketFeed>,
        settings: &ScanSettings,
    ) -> Self {
        Self {
            kalshi,
            polymarket,
            engine: EdgeEngine::new(settings.thresholds),
            warnings: WarningLog::new(settings.max_warnings),
            status: ScanStatus::default(),
        }
    }

    /// Create a scanner over the live venue APIs
    pub fn from_config(config: &Config) -> Result<Self, FeedError> {
        let kalshi = KalshiClient::with_config((&config.feeds).into())?;
        let polymarket = GammaClient::with_config((&config.feeds).into())?;
        Ok(Self::new(
            Box::new(kalshi),
            Box::new(polymarket),
            &config.scanner.settings(),
        ))
    }

    pub fn engine(&self) -> &EdgeEngine {
        &self.engine
    }

    pub fn status(&self) -> &ScanStatus {
        &self.status
    }

    pub fn warnings(&self) -> &WarningLog {
        &self.warnings
    }

    pub fn clear_warnings(&mut self) {
        self.warnings.clear();
    }

    /// Run one full cycle
    ///
    /// Both venues are fetched concurrently. A failed fetch leaves that
    /// venue empty for this cycle and is recorded as a warning; the cycle
    /// itself always completes.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let started_at = Utc::now();
        let timer = Instant::now();

        let (kalshi, polymarket) = tokio::join!(
            fetch_markets(self.kalshi.as_ref()),
            fetch_markets(self.polymarket.as_ref())
        );

        let mut failed_venues = Vec::new();
        let kalshi = self.degrade_on_error(kalshi, &mut failed_venues);
        let polymarket = self.degrade_on_error(polymarket, &mut failed_venues);

        let edges = self.engine.find_edges(&kalshi, &polymarket);
        let completed_at = Utc::now();

        self.status = ScanStatus {
            last_update: Some(completed_at),
            edge_count: edges.len(),
            cycles: self.status.cycles + 1,
        };

        telemetry::record_latency(LatencyMetric::ScanCycle, timer.elapsed());
        telemetry::set_gauge(GaugeMetric::Markets(Venue::Kalshi), kalshi.len() as f64);
        telemetry::set_gauge(GaugeMetric::Markets(Venue::Polymarket), polymarket.len() as f64);
        telemetry::set_gauge(GaugeMetric::RankedEdges, edges.len() as f64);
        telemetry::set_gauge(
            GaugeMetric::TopEdgeBps,
            edges.first().map_or(0.0, |e| f64::from(e.edge_bps)),
        );

        tracing::info!(
            cycle = self.status.cycles,
            kalshi = kalshi.len(),
            polymarket = polymarket.len(),
            edges = edges.len(),
            failed = failed_venues.len(),
            elapsed_ms = timer.elapsed().as_millis() as u64,
            "Scan cycle complete"
        );

        CycleReport {
            started_at,
            completed_at,
            kalshi,
            polymarket,
            edges,
            failed_venues,
            warnings: self.warnings.snapshot(),
            status: self.status.clone(),
        }
    }

    fn degrade_on_error(
        &mut self,
        fetched: Result<Vec<Market>, FeedError>,
        failed_venues: &mut Vec<Venue>,
    ) -> Vec<Market> {
        match fetched {
            Ok(markets) => markets,
            Err(e) => {
                let venue = e.venue();
                tracing::warn!(venue = venue.as_str(), error = %e, "Venue fetch failed");
                telemetry::record_feed_failure(venue);
                self.warnings
                    .push(Some(venue), format!("{} fetch failed: {}", venue, e));
                failed_venues.push(venue);
                Vec::new()
            }
        }
    }
}

async fn fetch_markets(feed: &dyn MarketFeed) -> Result<Vec<Market>, FeedError> {
    let venue = feed.venue();
    let timer = Instant::now();
    let records = feed.fetch_records().await?;
    telemetry::record_latency(LatencyMetric::FeedFetch(venue), timer.elapsed());
    Ok(normalize_all(venue.schema(), &records))
}
