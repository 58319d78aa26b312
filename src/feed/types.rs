//! Feed error types

use crate::market::Venue;
use reqwest::StatusCode;
use thiserror::Error;

/// Transport-level failures while fetching a venue's markets
#[derive(Debug, Error)]
pub enum FeedError {
    /// Could not build the HTTP client
    #[error("{venue} client setup failed: {source}")]
    Client {
        venue: Venue,
        #[source]
        source: reqwest::Error,
    },
    /// Request never produced a response body
    #[error("{venue} request failed: {source}")]
    Transport {
        venue: Venue,
        #[source]
        source: reqwest::Error,
    },
    /// Venue answered with a non-success status
    #[error("{venue} HTTP {status}")]
    Http { venue: Venue, status: StatusCode },
    /// Body was not JSON
    #[error("{venue} returned invalid JSON: {source}")]
    Decode {
        venue: Venue,
        #[source]
        source: serde_json::Error,
    },
}

impl FeedError {
    /// Venue the failure came from
    pub fn venue(&self) -> Venue {
        match self {
            FeedError::Client { venue, .. }
            | FeedError::Transport { venue, .. }
            | FeedError::Http { venue, .. }
            | FeedError::Decode { venue, .. } => *venue,
        }
    }
}
