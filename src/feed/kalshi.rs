//! Kalshi trade API client
//!
//! Pulls the public market list. Prices arrive in cents and status is
//! exposed per market; both are handled by normalization, not here.

use super::{fetch_envelope, FeedError, MarketFeed};
use crate::config::FeedsConfig;
use crate::market::{RawRecord, Venue};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

/// Kalshi public markets endpoint
pub const KALSHI_MARKETS_URL: &str = "https://api.elections.kalshi.com/trade-api/v2/markets";

/// Configuration for the Kalshi client
#[derive(Debug, Clone)]
pub struct KalshiConfig {
    /// Markets endpoint URL
    pub markets_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for KalshiConfig {
    fn default() -> Self {
        Self {
            markets_url: KALSHI_MARKETS_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl From<&FeedsConfig> for KalshiConfig {
    fn from(feeds: &FeedsConfig) -> Self {
        Self {
            markets_url: feeds.kalshi_url.clone(),
            timeout: feeds.request_timeout(),
        }
    }
}

/// Client for Kalshi's market list
pub struct KalshiClient {
    config: KalshiConfig,
    client: Client,
}

impl KalshiClient {
    /// Create a new Kalshi client with default configuration
    pub fn new() -> Result<Self, FeedError> {
        Self::with_config(KalshiConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: KalshiConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| FeedError::Client {
                venue: Venue::Kalshi,
                source,
            })?;

        Ok(Self { config, client })
    }

    fn markets_request(&self) -> RequestBuilder {
        self.client.get(&self.config.markets_url)
    }
}

#[async_trait]
impl MarketFeed for KalshiClient {
    fn venue(&self) -> Venue {
        Venue::Kalshi
    }

    async fn fetch_records(&self) -> Result<Vec<RawRecord>, FeedError> {
        tracing::debug!(url = %self.config.markets_url, "Fetching Kalshi markets");
        fetch_envelope(Venue::Kalshi, self.markets_request()).await
    }
}
