//! KRW market price units.
//!
//! Bithumb only accepts order prices that are a multiple of a price unit
//! determined by the price level:
//!
//! | price ≥   | unit  |
//! |-----------|-------|
//! | 2,000,000 | 1,000 |
//! | 1,000,000 | 500   |
//! | 500,000   | 100   |
//! | 100,000   | 50    |
//! | 10,000    | 10    |
//! | 1,000     | 5     |
//! | 100       | 1     |
//! | 10        | 0.1   |
//! | otherwise | 0.01  |

use rust_decimal::{Decimal, RoundingStrategy};

/// `(threshold, unit mantissa, unit scale)`, highest threshold first.
const PRICE_UNITS: [(i64, i64, u32); 8] = [
    (2_000_000, 1_000, 0),
    (1_000_000, 500, 0),
    (500_000, 100, 0),
    (100_000, 50, 0),
    (10_000, 10, 0),
    (1_000, 5, 0),
    (100, 1, 0),
    (10, 1, 1),
];

/// The price unit that applies at `price`. A threshold belongs to the
/// bucket it starts, so `2_000_000` uses a unit of `1_000`.
pub fn tick_unit(price: Decimal) -> Decimal {
    PRICE_UNITS
        .iter()
        .find(|(threshold, _, _)| price >= Decimal::from(*threshold))
        .map(|(_, mantissa, scale)| Decimal::new(*mantissa, *scale))
        .unwrap_or_else(|| Decimal::new(1, 2))
}

/// Round `price` to the nearest multiple of its price unit.
///
/// Midpoints round to the even multiple (banker's rounding), so
/// `2_000_500` becomes `2_000_000` while `2_001_500` becomes `2_002_000`.
///
/// ```rust
/// use bithumb_api_client::types::tick_size;
/// use rust_decimal::Decimal;
///
/// assert_eq!(tick_size(Decimal::from(1_999_999)), Decimal::from(2_000_000));
/// assert_eq!(tick_size(Decimal::new(1234, 2)), Decimal::new(123, 1));
/// ```
pub fn tick_size(price: Decimal) -> Decimal {
    let unit = tick_unit(price);
    (price / unit).round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven) * unit
}
