//! Market model
//!
//! Common market shape shared by both venues, plus the raw record
//! extraction and per-venue normalization that produce it.

mod normalize;
mod record;

pub use normalize::{
    normalize, normalize_all, scale_probability, PriceSource, VenueSchema, KALSHI_SCHEMA,
    POLYMARKET_SCHEMA, TERMINAL_STATUSES,
};
pub use record::{unwrap_envelope, RawRecord};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prediction-market venue a market was sourced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    /// Kalshi trade API (venue A, the side edges are scanned from)
    Kalshi,
    /// Polymarket Gamma API (venue B, the side matches are searched in)
    Polymarket,
}

impl Venue {
    /// Normalization table for this venue
    pub fn schema(self) -> &'static VenueSchema {
        match self {
            Venue::Kalshi => &KALSHI_SCHEMA,
            Venue::Polymarket => &POLYMARKET_SCHEMA,
        }
    }

    /// Short label for metrics and log fields
    pub fn as_str(self) -> &'static str {
        match self {
            Venue::Kalshi => "kalshi",
            Venue::Polymarket => "polymarket",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Kalshi => write!(f, "Kalshi"),
            Venue::Polymarket => write!(f, "Polymarket"),
        }
    }
}

/// A normalized binary market
///
/// Probabilities, when present, are always in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Source venue
    pub venue: Venue,
    /// Venue-native identifier (display only, never used for matching)
    pub id: String,
    /// Human-readable market question, possibly empty
    pub title: String,
    /// Implied probability of YES
    pub yes_probability: Option<Decimal>,
    /// Implied probability of NO
    pub no_probability: Option<Decimal>,
}

impl Market {
    /// Create a market with no quotes
    pub fn new(venue: Venue, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            venue,
            id: id.into(),
            title: title.into(),
            yes_probability: None,
            no_probability: None,
        }
    }

    /// Set the YES probability
    pub fn with_yes(mut self, yes: Decimal) -> Self {
        self.yes_probability = Some(yes);
        self
    }

    /// Set the NO probability
    pub fn with_no(mut self, no: Decimal) -> Self {
        self.no_probability = Some(no);
        self
    }

    /// Whether this market can take part in edge computation
    pub fn is_quoted(&self) -> bool {
        self.yes_probability.is_some()
    }
}
