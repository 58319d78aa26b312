//! Prometheus metrics

use crate::market::Venue;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// One venue's market fetch
    FeedFetch(Venue),
    /// A full polling cycle, fetch through ranking
    ScanCycle,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Normalized markets from a venue in the last cycle
    Markets(Venue),
    /// Ranked edges in the last cycle
    RankedEdges,
    /// Widest edge in the last cycle, in bps
    TopEdgeBps,
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let millis = duration.as_secs_f64() * 1000.0;
    match metric {
        LatencyMetric::FeedFetch(venue) => {
            metrics::histogram!("arbstreamer_feed_fetch_latency_ms", "venue" => venue.as_str())
                .record(millis)
        }
        LatencyMetric::ScanCycle => {
            metrics::histogram!("arbstreamer_scan_cycle_latency_ms").record(millis)
        }
    }
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    match metric {
        GaugeMetric::Markets(venue) => {
            metrics::gauge!("arbstreamer_markets", "venue" => venue.as_str()).set(value)
        }
        GaugeMetric::RankedEdges => metrics::gauge!("arbstreamer_ranked_edges").set(value),
        GaugeMetric::TopEdgeBps => metrics::gauge!("arbstreamer_top_edge_bps").set(value),
    }
}

/// Count a failed venue fetch
pub fn record_feed_failure(venue: Venue) {
    metrics::counter!("arbstreamer_feed_failures_total", "venue" => venue.as_str()).increment(1);
}
