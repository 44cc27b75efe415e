//! Ticker entries and the aggregate map

use serde::Deserialize;
use std::collections::BTreeMap;

/// Normalized symbol -> last price.
///
/// Prices stay as decimal strings, exactly as the exchange reported them.
/// Ordered so the serialized JSON has stable key order.
pub type TickerMap = BTreeMap<String, String>;

/// Price field as it appears on the wire.
///
/// Most exchanges quote prices as strings; some send bare JSON numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Text(String),
    Number(serde_json::Number),
}

impl RawPrice {
    /// Decimal string form of the price
    ///
    /// Floats use their shortest round-trip form (`50000.5`, `50000`).
    pub fn into_decimal_string(self) -> String {
        match self {
            RawPrice::Text(text) => text,
            RawPrice::Number(number) if number.is_f64() => match number.as_f64() {
                Some(value) => value.to_string(),
                None => number.to_string(),
            },
            RawPrice::Number(number) => number.to_string(),
        }
    }
}

/// Decimal string for a price that may be null or missing
///
/// Absent prices keep the entry and report the exchange's zero value instead.
pub fn price_or(price: Option<RawPrice>, zero: &str) -> String {
    price
        .map(RawPrice::into_decimal_string)
        .unwrap_or_else(|| zero.to_string())
}

/// Merge partial maps in order; later maps overwrite earlier ones on key collision.
pub fn merge<I>(partials: I) -> TickerMap
where
    I: IntoIterator<Item = TickerMap>,
{
    let mut merged = TickerMap::new();
    for partial in partials {
        merged.extend(partial);
    }
    merged
}
