//! In-memory feed
//!
//! Serves a fixed market list, e.g. a saved venue response, without any
//! network access. Can also be set up to fail every fetch.

use super::{FeedError, MarketFeed};
use crate::market::{unwrap_envelope, RawRecord, Venue};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::path::Path;

/// Feed that replays the same records on every fetch
#[derive(Debug, Clone)]
pub struct StaticFeed {
    venue: Venue,
    outcome: Result<Vec<RawRecord>, StatusCode>,
}

impl StaticFeed {
    /// Serve the given records
    pub fn new(venue: Venue, records: Vec<RawRecord>) -> Self {
        Self {
            venue,
            outcome: Ok(records),
        }
    }

    /// Serve the markets in a venue response body
    pub fn from_json(venue: Venue, body: serde_json::Value) -> Self {
        Self::new(venue, unwrap_envelope(body))
    }

    /// Serve the markets in a saved venue response file
    pub fn from_file(venue: Venue, path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let body = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid JSON in {}: {}", path.display(), e))?;
        Ok(Self::from_json(venue, body))
    }

    /// Fail every fetch with the given HTTP status
    pub fn failing(venue: Venue, status: StatusCode) -> Self {
        Self {
            venue,
            outcome: Err(status),
        }
    }
}

#[async_trait]
impl MarketFeed for StaticFeed {
    fn venue(&self) -> Venue {
        self.venue
    }

    async fn fetch_records(&self) -> Result<Vec<RawRecord>, FeedError> {
        match &self.outcome {
            Ok(records) => Ok(records.clone()),
            Err(status) => Err(FeedError::Http {
                venue: self.venue,
                status: *status,
            }),
        }
    }
}
