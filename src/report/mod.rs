//! Cycle report rendering
//!
//! Turns a [`CycleReport`] into a plain-text table or JSON. Rendering never
//! touches the scanner; it only reads the report.

use crate::edge::RankedEdge;
use crate::market::{Market, Venue};
use crate::scanner::CycleReport;
use clap::ValueEnum;
use rust_decimal::Decimal;
use tabled::settings::object::Columns;
use tabled::settings::Width;
use tabled::{Table, Tabled};

/// Rows shown per venue in the raw market table
pub const RAW_ROWS_PER_VENUE: usize = 50;

const TITLE_WIDTH: usize = 56;
const ID_WIDTH: usize = 24;
const ELLIPSIS: &str = "…";

/// Output format for cycle reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// One JSON document per cycle
    Json,
}

#[derive(Debug, Tabled)]
struct EdgeRow {
    #[tabled(rename = "Edge (bps)")]
    edge_bps: u32,
    #[tabled(rename = "Market")]
    title: String,
    #[tabled(rename = "Kalshi")]
    kalshi: String,
    #[tabled(rename = "Poly")]
    poly: String,
    #[tabled(rename = "Sim")]
    sim: String,
    #[tabled(rename = "IDs")]
    ids: String,
}

impl From<&RankedEdge> for EdgeRow {
    fn from(edge: &RankedEdge) -> Self {
        Self {
            edge_bps: edge.edge_bps,
            title: edge.display_title().to_string(),
            kalshi: fmt_pct(Some(edge.kalshi_yes)),
            poly: fmt_pct(Some(edge.polymarket_yes)),
            sim: format!("{:.0}", edge.similarity),
            ids: format!("{} / {}", edge.kalshi.id, edge.polymarket.id),
        }
    }
}

#[derive(Debug, Tabled)]
struct MarketRow {
    #[tabled(rename = "Venue")]
    venue: Venue,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Yes")]
    yes: String,
    #[tabled(rename = "No")]
    no: String,
}

impl From<&Market> for MarketRow {
    fn from(market: &Market) -> Self {
        Self {
            venue: market.venue,
            id: market.id.clone(),
            title: market.title.clone(),
            yes: fmt_pct(market.yes_probability),
            no: fmt_pct(market.no_probability),
        }
    }
}

/// Render a report in the requested format
pub fn render(report: &CycleReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(report)),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
    }
}

/// Probability as a percentage with one decimal, or a dash when absent
pub fn fmt_pct(p: Option<Decimal>) -> String {
    match p {
        Some(p) => format!("{:.1}%", p * Decimal::ONE_HUNDRED),
        None => "—".to_string(),
    }
}

/// One-line status summary
pub fn status_line(report: &CycleReport) -> String {
    let last = report
        .status
        .last_update
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    format!("Last update: {} | Edges: {}", last, report.status.edge_count)
}

fn edge_table(edges: &[RankedEdge]) -> String {
    Table::new(edges.iter().map(EdgeRow::from))
        .modify(Columns::single(1), Width::truncate(TITLE_WIDTH).suffix(ELLIPSIS))
        .to_string()
}

fn market_table<'a>(markets: impl Iterator<Item = &'a Market>) -> String {
    Table::new(markets.map(MarketRow::from))
        .modify(Columns::single(1), Width::truncate(ID_WIDTH).suffix(ELLIPSIS))
        .modify(Columns::single(2), Width::truncate(TITLE_WIDTH).suffix(ELLIPSIS))
        .to_string()
}

/// Full text rendering: status, warnings, edges, then raw markets
pub fn render_table(report: &CycleReport) -> String {
    let mut sections = vec![
        status_line(report),
        format!(
            "Kalshi: {} markets | Polymarket: {} markets",
            report.kalshi.len(),
            report.polymarket.len()
        ),
    ];

    sections.extend(
        report
            .warnings
            .iter()
            .map(|w| format!("⚠ [{}] {}", w.at.format("%H:%M:%S"), w.message)),
    );

    sections.push(format!("\nEdges ({})", report.edges.len()));
    if report.edges.is_empty() {
        sections.push("  none above threshold".to_string());
    } else {
        sections.push(edge_table(&report.edges));
    }

    sections.push("\nMarkets".to_string());
    sections.push(market_table(
        report
            .kalshi
            .iter()
            .take(RAW_ROWS_PER_VENUE)
            .chain(report.polymarket.iter().take(RAW_ROWS_PER_VENUE)),
    ));

    sections.join("\n")
}
