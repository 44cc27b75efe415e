//! Symbol normalization
//!
//! Every exchange names its pairs differently (`BTC/USD`, `BTC-USDT`, `BTC_USDT`,
//! `BTCUSDT`). Normalized symbols drop the pair delimiter and rewrite a trailing
//! `USD` quote to `USDT`, so all exchanges share one key space.
//!
//! The `USD` -> `USDT` rewrite is a modeling approximation: it treats fiat USD
//! quotes and USDT quotes as the same market.

/// Quote currency rewritten by [`normalize_symbol`]
const USD_SUFFIX: &str = "USD";

/// Normalize an exchange-native pair name.
///
/// Removes the first occurrence of `delimiter` (only that one) and appends `T`
/// when the remainder ends in exactly `USD`.
///
/// ```
/// use ticker_aggregator::core::normalize_symbol;
///
/// assert_eq!(normalize_symbol("BTC/USD", '/'), "BTCUSDT");
/// assert_eq!(normalize_symbol("ETH_USDT", '_'), "ETHUSDT");
/// ```
pub fn normalize_symbol(raw: &str, delimiter: char) -> String {
    let mut symbol = raw.replacen(delimiter, "", 1);
    if symbol.ends_with(USD_SUFFIX) {
        symbol.push('T');
    }
    symbol
}

/// Symbol filter applied before normalization.
///
/// Accepts everything. Kept as the single place to restrict which pairs get
/// aggregated.
#[inline]
pub fn accept_symbol(_symbol: &str) -> bool {
    true
}
