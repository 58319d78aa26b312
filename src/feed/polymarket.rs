//! Gamma API client for Polymarket market lists
//!
//! Fetches active markets from Polymarket's Gamma API. Quotes come back as
//! unit-fraction `bestBid`/`bestAsk` fields on each market.

use super::{fetch_envelope, FeedError, MarketFeed};
use crate::config::FeedsConfig;
use crate::market::{RawRecord, Venue};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

/// Gamma API base URL
pub const GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";

/// Configuration for the Gamma client
#[derive(Debug, Clone)]
pub struct GammaConfig {
    /// Base URL for the Gamma API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum markets per request
    pub limit: u32,
}

impl Default for GammaConfig {
    fn default() -> Self {
        Self {
            base_url: GAMMA_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            limit: 500,
        }
    }
}

impl From<&FeedsConfig> for GammaConfig {
    fn from(feeds: &FeedsConfig) -> Self {
        Self {
            base_url: feeds.polymarket_url.clone(),
            timeout: feeds.request_timeout(),
            limit: feeds.polymarket_limit,
        }
    }
}

/// Client for Polymarket's Gamma API
pub struct GammaClient {
    config: GammaConfig,
    client: Client,
}

impl GammaClient {
    /// Create a new Gamma API client with default configuration
    pub fn new() -> Result<Self, FeedError> {
        Self::with_config(GammaConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: GammaConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| FeedError::Client {
                venue: Venue::Polymarket,
                source,
            })?;

        Ok(Self { config, client })
    }

    /// Active markets, one page of `limit`
    fn markets_request(&self) -> RequestBuilder {
        let url = format!("{}/markets", self.config.base_url.trim_end_matches('/'));
        self.client.get(url).query(&[
            ("limit", self.config.limit.to_string()),
            ("active", "true".to_string()),
        ])
    }
}

#[async_trait]
impl MarketFeed for GammaClient {
    fn venue(&self) -> Venue {
        Venue::Polymarket
    }

    async fn fetch_records(&self) -> Result<Vec<RawRecord>, FeedError> {
        tracing::debug!(
            base_url = %self.config.base_url,
            limit = self.config.limit,
            "Fetching Polymarket markets from Gamma API"
        );
        fetch_envelope(Venue::Polymarket, self.markets_request()).await
    }
}
