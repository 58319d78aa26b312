//! arb-streamer: cross-venue prediction market edge scanner
//!
//! This library provides the core components for:
//! - Fetching raw market lists from Kalshi and Polymarket
//! - Normalizing venue records into a common market shape
//! - Matching markets across venues by title similarity
//! - Ranking YES price gaps (edges) in basis points
//! - Polling cycles with a stoppable scheduler
//! - Text/JSON rendering of cycle reports

pub mod cli;
pub mod config;
pub mod edge;
pub mod feed;
pub mod market;
pub mod matching;
pub mod report;
pub mod scanner;
pub mod telemetry;
