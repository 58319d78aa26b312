//! Edge detection across the two venues

use super::{EdgeThresholds, MatchCandidate, RankedEdge};
use crate::market::Market;
use crate::matching::{title_tokens, token_similarity};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashSet;

/// Upper bound on edges returned per scan
pub const MAX_RANKED_EDGES: usize = 50;

const BPS_PER_UNIT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Absolute YES price gap in basis points, rounded half away from zero
pub fn edge_bps(a: Decimal, b: Decimal) -> u32 {
    ((a - b).abs() * BPS_PER_UNIT)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Scans Kalshi markets for their best-priced Polymarket counterpart
#[derive(Debug, Clone)]
pub struct EdgeEngine {
    thresholds: EdgeThresholds,
    max_edges: usize,
}

impl EdgeEngine {
    /// Create an engine with the given thresholds
    pub fn new(thresholds: EdgeThresholds) -> Self {
        Self {
            thresholds,
            max_edges: MAX_RANKED_EDGES,
        }
    }

    /// Current thresholds
    pub fn thresholds(&self) -> &EdgeThresholds {
        &self.thresholds
    }

    /// Rank edges between the two venue lists
    ///
    /// Every Kalshi market claims at most one Polymarket market: the one with
    /// the widest gap among pairs that clear both thresholds, first wins on
    /// ties. A Polymarket market may still be claimed by several Kalshi
    /// markets. Results are ordered widest first (stable) and capped.
    pub fn find_edges(&self, kalshi: &[Market], polymarket: &[Market]) -> Vec<RankedEdge> {
        let poly_tokens: Vec<HashSet<String>> =
            polymarket.iter().map(|m| title_tokens(&m.title)).collect();

        let mut edges: Vec<RankedEdge> = kalshi
            .iter()
            .filter_map(|k| self.best_match(k, polymarket, &poly_tokens))
            .map(MatchCandidate::into_ranked)
            .collect();

        // sort_by is stable: equal edges keep Kalshi order
        edges.sort_by(|a, b| b.edge_bps.cmp(&a.edge_bps));
        edges.truncate(self.max_edges);

        tracing::debug!(
            kalshi = kalshi.len(),
            polymarket = polymarket.len(),
            edges = edges.len(),
            min_similarity = self.thresholds.min_similarity,
            min_edge_bps = self.thresholds.min_edge_bps,
            "Edge scan complete"
        );

        edges
    }

    fn best_match<'a>(
        &self,
        kalshi: &'a Market,
        polymarket: &'a [Market],
        poly_tokens: &[HashSet<String>],
    ) -> Option<MatchCandidate<'a>> {
        let kalshi_tokens = title_tokens(&kalshi.title);
        let mut best: Option<MatchCandidate<'a>> = None;

        for (poly, tokens) in polymarket.iter().zip(poly_tokens) {
            let similarity = token_similarity(&kalshi_tokens, tokens);
            if similarity < self.thresholds.min_similarity {
                continue;
            }

            let (Some(kalshi_yes), Some(polymarket_yes)) =
                (kalshi.yes_probability, poly.yes_probability)
            else {
                continue;
            };

            let bps = edge_bps(kalshi_yes, polymarket_yes);
            if bps < self.thresholds.min_edge_bps {
                continue;
            }

            if best.map_or(true, |b| bps > b.edge_bps) {
                best = Some(MatchCandidate {
                    kalshi,
                    polymarket: poly,
                    kalshi_yes,
                    polymarket_yes,
                    similarity,
                    edge_bps: bps,
                });
            }
        }

        best
    }
}

impl Default for EdgeEngine {
    fn default() -> Self {
        Self::new(EdgeThresholds::default())
    }
}

/// Rank edges with explicit thresholds
pub fn find_edges(
    kalshi: &[Market],
    polymarket: &[Market],
    min_similarity: f64,
    min_edge_bps: u32,
) -> Vec<RankedEdge> {
    EdgeEngine::new(EdgeThresholds {
        min_similarity,
        min_edge_bps,
    })
    .find_edges(kalshi, polymarket)
}
