//! Wire records of the data API.
//!
//! Explicit JSON `null` values decode like missing fields, so one sparse
//! record never fails the decode of a whole listing or chart.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CmcError, Result};

/// Deserializes `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Helper to deserialize a value that may be either a JSON string or integer.
/// `null` reads as 0.
pub(crate) fn deserialize_string_or_int<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i64),
    }

    match Option::<StringOrInt>::deserialize(deserializer)? {
        Some(StringOrInt::String(s)) => s.trim().parse().map_err(de::Error::custom),
        Some(StringOrInt::Int(i)) => Ok(i),
        None => Ok(0),
    }
}

/// Status block some data-api responses carry next to `data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Status {
    #[serde(default, deserialize_with = "deserialize_string_or_int")]
    pub error_code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Price data of a coin in one fiat currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(rename = "volume24h", deserialize_with = "null_as_default")]
    pub volume_24h: f64,
    #[serde(rename = "marketCap", deserialize_with = "null_as_default")]
    pub market_cap: f64,
    #[serde(rename = "percentChange1h", deserialize_with = "null_as_default")]
    pub percent_change_1h: f64,
    #[serde(rename = "percentChange24h", deserialize_with = "null_as_default")]
    pub percent_change_24h: f64,
    #[serde(rename = "percentChange7d", deserialize_with = "null_as_default")]
    pub percent_change_7d: f64,
}

/// One entry of the cryptocurrency listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRecord {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub circulating_supply: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quotes: Vec<QuoteRecord>,
}

impl SymbolRecord {
    /// The first quote, which is the one presented.
    pub fn primary_quote(&self) -> Result<&QuoteRecord> {
        self.quotes.first().ok_or_else(|| CmcError::MissingQuote {
            symbol: self.symbol.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListingData {
    pub crypto_currency_list: Vec<SymbolRecord>,
}

/// A candidate returned by the symbol map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub rank: Option<i64>,
}

/// Values recorded at one chart timestamp.
///
/// `v` holds the raw values (price, volume, market cap, then rank and supply
/// fields); `c` is the condensed price/volume/market cap triple and may be
/// missing on some points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub v: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub c: Vec<f64>,
}

impl ChartPoint {
    fn field(&self, index: usize) -> Option<f64> {
        self.c.get(index).or_else(|| self.v.get(index)).copied()
    }

    pub fn price(&self) -> Option<f64> {
        self.field(0)
    }

    pub fn volume(&self) -> Option<f64> {
        self.field(1)
    }

    pub fn market_cap(&self) -> Option<f64> {
        self.field(2)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ChartData {
    pub points: HashMap<String, ChartPoint>,
}
