//! Custom serde helpers for Bithumb's loosely typed JSON.
//!
//! Bithumb sends most amounts as decimal strings, but optional amounts show
//! up as `null`, as an empty string, or occasionally as a bare number.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserializer, de};

/// Deserialize an optional decimal that may be `null`, `""`, a decimal
/// string, or a JSON number.
///
/// # Example
///
/// ```rust
/// use rust_decimal::Decimal;
/// use serde::Deserialize;
/// use bithumb_api_client::types::serde_helpers::optional_decimal;
///
/// #[derive(Deserialize)]
/// struct Fill {
///     #[serde(default, deserialize_with = "optional_decimal::deserialize")]
///     price: Option<Decimal>,
/// }
///
/// let fill: Fill = serde_json::from_str(r#"{"price": "1500.5"}"#).unwrap();
/// assert_eq!(fill.price, Some(Decimal::new(15005, 1)));
///
/// let fill: Fill = serde_json::from_str(r#"{"price": null}"#).unwrap();
/// assert_eq!(fill.price, None);
/// ```
pub mod optional_decimal {
    use super::*;

    /// Deserialize into `Option<Decimal>`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OptionalDecimalVisitor;

        impl<'de> de::Visitor<'de> for OptionalDecimalVisitor {
            type Value = Option<Decimal>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal string, a number, or null")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v.is_empty() {
                    return Ok(None);
                }
                v.parse().map(Some).map_err(de::Error::custom)
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                self.visit_str(&v)
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(Decimal::from(v)))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(Decimal::from(v)))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Decimal::try_from(v).map(Some).map_err(de::Error::custom)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }
        }

        deserializer.deserialize_any(OptionalDecimalVisitor)
    }
}
