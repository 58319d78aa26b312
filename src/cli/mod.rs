//! CLI interface for arb-streamer
//!
//! Provides subcommands for:
//! - `run`: Poll both venues until interrupted
//! - `scan`: Run a single cycle and exit
//! - `config`: Show the effective configuration

mod run;
mod scan;

pub use run::RunArgs;
pub use scan::ScanArgs;

use crate::config::Config;
use crate::feed::{GammaClient, KalshiClient, MarketFeed, StaticFeed};
use crate::market::Venue;
use crate::scanner::Scanner;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arb-streamer")]
#[command(about = "Match Kalshi and Polymarket markets and rank their price edges")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll both venues until interrupted
    Run(RunArgs),
    /// Run a single scan cycle
    Scan(ScanArgs),
    /// Show the effective configuration
    Config,
}

/// Feed sources and threshold overrides shared by `run` and `scan`
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Read Kalshi markets from a saved JSON response instead of the API
    #[arg(long, value_name = "PATH")]
    pub kalshi_file: Option<PathBuf>,

    /// Read Polymarket markets from a saved JSON response instead of the API
    #[arg(long, value_name = "PATH")]
    pub polymarket_file: Option<PathBuf>,

    /// Override the minimum title similarity (clamped to 50..=100)
    #[arg(long)]
    pub min_similarity: Option<f64>,

    /// Override the minimum edge in basis points
    #[arg(long)]
    pub min_edge_bps: Option<f64>,
}

impl SourceArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &Config) -> Config {
        let mut config = config.clone();
        if let Some(min_similarity) = self.min_similarity {
            config.scanner.min_similarity_score = min_similarity;
        }
        if let Some(min_edge_bps) = self.min_edge_bps {
            config.scanner.min_edge_bps = min_edge_bps;
        }
        config
    }

    /// Build a scanner over saved files where given, live APIs otherwise
    pub fn build_scanner(&self, config: &Config) -> anyhow::Result<Scanner> {
        let kalshi: Box<dyn MarketFeed> = match &self.kalshi_file {
            Some(path) => Box::new(StaticFeed::from_file(Venue::Kalshi, path)?),
            None => Box::new(KalshiClient::with_config((&config.feeds).into())?),
        };
        let polymarket: Box<dyn MarketFeed> = match &self.polymarket_file {
            Some(path) => Box::new(StaticFeed::from_file(Venue::Polymarket, path)?),
            None => Box::new(GammaClient::with_config((&config.feeds).into())?),
        };

        Ok(Scanner::new(kalshi, polymarket, &config.scanner.settings()))
    }
}
