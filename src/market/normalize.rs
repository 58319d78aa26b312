//! Venue record normalization
//!
//! Each venue is described by a static [`VenueSchema`]: where its status
//! lives, which fields identify and title a market, and the ordered price
//! sources for each outcome. The first source that yields a value wins.

use super::{Market, RawRecord, Venue};
use rust_decimal::Decimal;

/// Status values that mark a market as no longer tradeable
pub const TERMINAL_STATUSES: [&str; 2] = ["closed", "settled"];

/// Prices above this are quoted in cents/percent and get divided by 100
const PERCENT_SCALE_THRESHOLD: Decimal = Decimal::ONE;

/// Where an outcome probability can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    /// The field's value, as a probability
    Field(&'static str),
    /// One minus the field's value, e.g. NO implied from the YES ask
    ComplementOf(&'static str),
}

impl PriceSource {
    /// Read this source from a record, scaled to `[0, 1]`
    pub fn extract(&self, record: &RawRecord) -> Option<Decimal> {
        match *self {
            PriceSource::Field(field) => record.number(field).and_then(scale_probability),
            PriceSource::ComplementOf(field) => record
                .number(field)
                .and_then(scale_probability)
                .map(|p| Decimal::ONE - p),
        }
    }
}

/// Normalization table for one venue
#[derive(Debug)]
pub struct VenueSchema {
    pub venue: Venue,
    /// Lifecycle status field, if the venue exposes one
    pub status_field: Option<&'static str>,
    pub id_fields: &'static [&'static str],
    pub title_fields: &'static [&'static str],
    pub yes_sources: &'static [PriceSource],
    pub no_sources: &'static [PriceSource],
}

pub static KALSHI_SCHEMA: VenueSchema = VenueSchema {
    venue: Venue::Kalshi,
    status_field: Some("status"),
    id_fields: &["ticker", "id"],
    title_fields: &["title", "name", "ticker"],
    yes_sources: &[
        PriceSource::Field("yes_bid"),
        PriceSource::Field("last_yes_price"),
        PriceSource::Field("last_price"),
    ],
    no_sources: &[PriceSource::Field("no_bid")],
};

pub static POLYMARKET_SCHEMA: VenueSchema = VenueSchema {
    venue: Venue::Polymarket,
    status_field: None,
    id_fields: &["id", "slug", "question"],
    title_fields: &["question", "title", "slug"],
    yes_sources: &[
        PriceSource::Field("bestBid"),
        PriceSource::Field("yesBid"),
        PriceSource::Field("lastPrice"),
    ],
    no_sources: &[
        PriceSource::ComplementOf("bestAsk"),
        PriceSource::Field("noBid"),
    ],
};

impl VenueSchema {
    /// Whether the record's status marks it closed or settled
    pub fn is_terminal(&self, record: &RawRecord) -> bool {
        let Some(field) = self.status_field else {
            return false;
        };
        record.text(field).is_some_and(|status| {
            TERMINAL_STATUSES
                .iter()
                .any(|terminal| status.eq_ignore_ascii_case(terminal))
        })
    }
}

/// Bring a quoted price into `[0, 1]`
///
/// Values above 1 are read as a 0-100 scale. Anything still outside
/// `[0, 1]` afterwards is not a usable probability. Exactly 1 is kept.
pub fn scale_probability(value: Decimal) -> Option<Decimal> {
    let scaled = if value > PERCENT_SCALE_THRESHOLD {
        value / Decimal::ONE_HUNDRED
    } else {
        value
    };

    (Decimal::ZERO..=Decimal::ONE)
        .contains(&scaled)
        .then_some(scaled)
}

fn first_price(sources: &[PriceSource], record: &RawRecord) -> Option<Decimal> {
    sources.iter().find_map(|source| source.extract(record))
}

/// Normalize one raw record, or `None` if the market is closed/settled
pub fn normalize(schema: &VenueSchema, record: &RawRecord) -> Option<Market> {
    if schema.is_terminal(record) {
        return None;
    }

    let yes_probability = first_price(schema.yes_sources, record);
    // NO may be derived from YES, never the other way around
    let no_probability = first_price(schema.no_sources, record)
        .or_else(|| yes_probability.map(|y| Decimal::ONE - y));

    Some(Market {
        venue: schema.venue,
        id: record.first_text(schema.id_fields).unwrap_or_default(),
        title: record.first_text(schema.title_fields).unwrap_or_default(),
        yes_probability,
        no_probability,
    })
}

/// Normalize a venue's full record list, dropping terminal markets
pub fn normalize_all(schema: &VenueSchema, records: &[RawRecord]) -> Vec<Market> {
    let markets: Vec<Market> = records
        .iter()
        .filter_map(|record| normalize(schema, record))
        .collect();

    tracing::debug!(
        venue = schema.venue.as_str(),
        received = records.len(),
        kept = markets.len(),
        quoted = markets.iter().filter(|m| m.is_quoted()).count(),
        "Normalized venue records"
    );

    markets
}
