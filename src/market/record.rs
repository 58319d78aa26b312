//! Untyped venue records
//!
//! Venue payloads are loosely shaped JSON, so records are kept as objects
//! and fields are pulled out through typed accessors that return `None`
//! instead of failing.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Keys a venue response may wrap its market array in, in lookup order
const ENVELOPE_KEYS: [&str; 2] = ["markets", "data"];

/// A single raw market object from a venue response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wrap a JSON object
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Numeric field value; strings and other JSON types are not prices
    pub fn number(&self, field: &str) -> Option<Decimal> {
        match self.0.get(field)? {
            Value::Number(n) => number_to_decimal(n),
            _ => None,
        }
    }

    /// Non-empty text field value; numeric identifiers are rendered as text
    pub fn text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// First non-empty text value among `fields`
    pub fn first_text(&self, fields: &[&str]) -> Option<String> {
        fields.iter().find_map(|f| self.text(f))
    }

    /// Whether the record carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }
}

fn number_to_decimal(n: &Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    n.as_f64().and_then(Decimal::from_f64)
}

/// Extract the market array from a venue response body
///
/// Accepts `{"markets": [...]}`, `{"data": [...]}` or a bare array.
/// Anything else yields no records. Non-object entries are kept as empty
/// records so list counts still reflect what the venue sent.
pub fn unwrap_envelope(body: Value) -> Vec<RawRecord> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut fields) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| match fields.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    items.into_iter().map(RawRecord::from).collect()
}
