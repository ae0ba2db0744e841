//! Ticker normalization.

/// The fiat currency of Bithumb's KRW market.
pub const FIAT_CURRENCY: &str = "KRW";

/// Ticker accepted by amount lookups to aggregate every held currency.
pub const ALL_TICKERS: &str = "ALL";

/// Reduce a market pair (`KRW-BTC`) to the currency code used as the
/// account balance key (`BTC`). Plain currency codes pass through.
///
/// ```rust
/// use bithumb_api_client::types::normalize_ticker;
///
/// assert_eq!(normalize_ticker("KRW-BTC"), "BTC");
/// assert_eq!(normalize_ticker("BTC"), "BTC");
/// ```
pub fn normalize_ticker(ticker: &str) -> &str {
    match ticker.split('-').nth(1) {
        Some(currency) => currency,
        None => ticker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_and_currency_share_key() {
        assert_eq!(normalize_ticker("KRW-BTC"), normalize_ticker("BTC"));
        assert_eq!(normalize_ticker("BTC-XRP"), "XRP");
    }

    #[test]
    fn test_fiat_passes_through() {
        assert_eq!(normalize_ticker(FIAT_CURRENCY), "KRW");
        assert_eq!(normalize_ticker(ALL_TICKERS), "ALL");
    }
}
