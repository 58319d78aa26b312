//! Edge engine
//!
//! Pairs each Kalshi market with its best Polymarket counterpart by title
//! and ranks the YES price gaps that clear the configured thresholds.

mod engine;
mod types;

pub use engine::{edge_bps, find_edges, EdgeEngine, MAX_RANKED_EDGES};
pub use types::{EdgeThresholds, MatchCandidate, RankedEdge};
