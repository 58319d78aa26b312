//! Edge types

use crate::market::{Market, Venue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Thresholds a matched pair must clear to become an edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeThresholds {
    /// Minimum title similarity, in `[0, 100]`
    pub min_similarity: f64,
    /// Minimum price gap in basis points
    pub min_edge_bps: u32,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            min_similarity: 80.0,
            min_edge_bps: 120,
        }
    }
}

/// A scored Kalshi/Polymarket pairing, alive only while scanning
#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate<'a> {
    pub kalshi: &'a Market,
    pub polymarket: &'a Market,
    pub kalshi_yes: Decimal,
    pub polymarket_yes: Decimal,
    pub similarity: f64,
    pub edge_bps: u32,
}

impl MatchCandidate<'_> {
    /// Detach from the scanned lists
    pub fn into_ranked(self) -> RankedEdge {
        RankedEdge {
            kalshi: self.kalshi.clone(),
            polymarket: self.polymarket.clone(),
            kalshi_yes: self.kalshi_yes,
            polymarket_yes: self.polymarket_yes,
            similarity: self.similarity,
            edge_bps: self.edge_bps,
        }
    }
}

/// Best match for one Kalshi market that cleared both thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEdge {
    /// Kalshi side of the pair
    pub kalshi: Market,
    /// Polymarket side of the pair
    pub polymarket: Market,
    /// Kalshi implied YES probability
    pub kalshi_yes: Decimal,
    /// Polymarket implied YES probability
    pub polymarket_yes: Decimal,
    /// Title similarity in `[0, 100]`
    pub similarity: f64,
    /// Absolute YES price gap in basis points
    pub edge_bps: u32,
}

impl RankedEdge {
    /// The more descriptive (longer) of the two titles
    pub fn display_title(&self) -> &str {
        if self.kalshi.title.len() < self.polymarket.title.len() {
            &self.polymarket.title
        } else {
            &self.kalshi.title
        }
    }

    /// Venue quoting YES cheaper; the side an arbitrageur would buy
    pub fn cheaper_venue(&self) -> Venue {
        if self.kalshi_yes <= self.polymarket_yes {
            self.kalshi.venue
        } else {
            self.polymarket.venue
        }
    }
}
