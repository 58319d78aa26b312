//! End-to-end scan tests over saved venue responses

use arb_streamer::config::ScanSettings;
use arb_streamer::edge::find_edges;
use arb_streamer::feed::StaticFeed;
use arb_streamer::market::{
    normalize_all, unwrap_envelope, Venue, KALSHI_SCHEMA, POLYMARKET_SCHEMA,
};
use arb_streamer::scanner::{Scanner, Scheduler};
use reqwest::StatusCode;
use rust_decimal_macros::dec;
use std::time::Duration;

const KALSHI_FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/kalshi_markets.json"
);
const POLYMARKET_FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/polymarket_markets.json"
);

fn kalshi() -> StaticFeed {
    StaticFeed::from_file(Venue::Kalshi, KALSHI_FIXTURE).unwrap()
}

fn polymarket() -> StaticFeed {
    StaticFeed::from_file(Venue::Polymarket, POLYMARKET_FIXTURE).unwrap()
}

fn scanner(settings: &ScanSettings) -> Scanner {
    Scanner::new(Box::new(kalshi()), Box::new(polymarket()), settings)
}

fn settings(min_similarity: f64, min_edge_bps: u32) -> ScanSettings {
    let mut settings = ScanSettings::default();
    settings.thresholds.min_similarity = min_similarity;
    settings.thresholds.min_edge_bps = min_edge_bps;
    settings
}

#[tokio::test]
async fn test_fixture_scan_with_defaults() {
    let mut scanner = scanner(&ScanSettings::default());
    let report = scanner.run_cycle().await;

    // Settled and closed Kalshi markets are dropped, unquoted ones kept
    assert_eq!(report.kalshi.len(), 4);
    assert_eq!(report.polymarket.len(), 5);
    assert!(report.warnings.is_empty());

    let pairs: Vec<(&str, &str, u32)> = report
        .edges
        .iter()
        .map(|e| (e.kalshi.id.as_str(), e.polymarket.id.as_str(), e.edge_bps))
        .collect();
    assert_eq!(pairs, vec![("KXPRES-X", "501", 1500), ("KXBTC-100K", "503", 1500)]);
    assert_eq!(report.status.edge_count, 2);
}

#[tokio::test]
async fn test_fixture_scan_lower_edge_floor() {
    let mut scanner = scanner(&settings(80.0, 50));
    let report = scanner.run_cycle().await;

    let ids: Vec<&str> = report.edges.iter().map(|e| e.kalshi.id.as_str()).collect();
    assert_eq!(ids, vec!["KXPRES-X", "KXBTC-100K", "KXFED-JUN"]);
    assert_eq!(report.edges[2].edge_bps, 100);
    assert_eq!(report.edges[2].similarity, 100.0);
}

#[tokio::test]
async fn test_fixture_scan_strict_similarity() {
    let mut scanner = scanner(&settings(90.0, 120));
    let report = scanner.run_cycle().await;
    assert!(report.edges.is_empty());
}

#[tokio::test]
async fn test_one_venue_down_still_reports_other() {
    let mut scanner = Scanner::new(
        Box::new(kalshi()),
        Box::new(StaticFeed::failing(Venue::Polymarket, StatusCode::BAD_GATEWAY)),
        &ScanSettings::default(),
    );
    let report = scanner.run_cycle().await;

    assert_eq!(report.kalshi.len(), 4);
    assert!(report.polymarket.is_empty());
    assert!(report.edges.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].message.starts_with("Polymarket fetch failed"));
    assert!(report.status.last_update.is_some());
}

#[test]
fn test_pure_pipeline_matches_scanner() {
    let kalshi_body = std::fs::read_to_string(KALSHI_FIXTURE).unwrap();
    let poly_body = std::fs::read_to_string(POLYMARKET_FIXTURE).unwrap();

    let kalshi_records = unwrap_envelope(serde_json::from_str(&kalshi_body).unwrap());
    let poly_records = unwrap_envelope(serde_json::from_str(&poly_body).unwrap());
    let kalshi = normalize_all(&KALSHI_SCHEMA, &kalshi_records);
    let polymarket = normalize_all(&POLYMARKET_SCHEMA, &poly_records);

    let btc = kalshi.iter().find(|m| m.id == "KXBTC-100K").unwrap();
    assert_eq!(btc.yes_probability, Some(dec!(0.63)));
    assert_eq!(btc.no_probability, Some(dec!(0.37)));

    let unquoted = polymarket.iter().find(|m| m.id == "no-quote-market").unwrap();
    assert!(!unquoted.is_quoted());

    let edges = find_edges(&kalshi, &polymarket, 80.0, 120);
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].display_title(), "Will X win the election?");
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_over_fixtures() {
    let scanner = scanner(&ScanSettings::default());
    let mut scheduler = Scheduler::new(Duration::from_secs(10));
    let mut reports = scheduler.start(scanner).unwrap();

    for cycle in 1..=3 {
        let report = reports.recv().await.unwrap();
        assert_eq!(report.status.cycles, cycle);
        assert_eq!(report.edges.len(), 2);
    }

    let scanner = scheduler.stop().await.unwrap();
    assert_eq!(scanner.status().cycles, 3);
    assert!(!scheduler.is_running());
}
