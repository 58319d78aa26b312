//! Venue feed adapters
//!
//! HTTP clients that pull raw market lists from Kalshi and Polymarket,
//! plus an in-memory feed for saved responses

mod fixture;
mod kalshi;
mod polymarket;
mod types;

pub use fixture::StaticFeed;
pub use kalshi::{KalshiClient, KalshiConfig, KALSHI_MARKETS_URL};
pub use polymarket::{GammaClient, GammaConfig, GAMMA_API_URL};
pub use types::FeedError;

use crate::market::{unwrap_envelope, RawRecord, Venue};
use async_trait::async_trait;
use reqwest::RequestBuilder;

/// Trait for venue feed implementations
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Venue this feed reads from
    fn venue(&self) -> Venue;
    /// Fetch the venue's current raw market records
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, FeedError>;
}

/// Send a request and unwrap the market array from its JSON body
async fn fetch_envelope(
    venue: Venue,
    request: RequestBuilder,
) -> Result<Vec<RawRecord>, FeedError> {
    let response = request
        .send()
        .await
        .map_err(|source| FeedError::Transport { venue, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Http { venue, status });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| FeedError::Transport { venue, source })?;
    let value: serde_json::Value =
        serde_json::from_slice(&body).map_err(|source| FeedError::Decode { venue, source })?;

    let records = unwrap_envelope(value);
    tracing::debug!(
        venue = venue.as_str(),
        records = records.len(),
        "Fetched venue markets"
    );
    Ok(records)
}
