//! Core types: market records and sort state

use serde::{Deserialize, Deserializer, Serialize};

/// One ranked market entry as returned by the CoinGecko markets endpoint.
///
/// Immutable once fetched; ordering for display is derived separately by
/// [`crate::view::ViewState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "current_price", default, deserialize_with = "null_to_zero")]
    pub price_usd: f64,
    #[serde(
        rename = "price_change_percentage_1h_in_currency",
        default,
        deserialize_with = "null_to_zero"
    )]
    pub change_1h: f64,
    #[serde(
        rename = "price_change_percentage_24h_in_currency",
        default,
        deserialize_with = "null_to_zero"
    )]
    pub change_24h: f64,
    #[serde(
        rename = "price_change_percentage_7d_in_currency",
        default,
        deserialize_with = "null_to_zero"
    )]
    pub change_7d: f64,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub market_cap: f64,
    #[serde(rename = "total_volume", default, deserialize_with = "null_to_zero")]
    pub volume_24h: f64,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub total_supply: f64,
}

/// The API reports `null` for fields it has no data for (new listings,
/// unknown supply). Treat those as zero rather than failing the whole
/// snapshot decode.
fn null_to_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Field the table is currently ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Rank,
    Name,
    Price,
    Change1h,
    Change24h,
    Change7d,
    MarketCap,
    Volume,
    TotalSupply,
}

impl SortKey {
    /// All sort keys, in column order
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Rank,
            SortKey::Name,
            SortKey::Price,
            SortKey::Change1h,
            SortKey::Change24h,
            SortKey::Change7d,
            SortKey::MarketCap,
            SortKey::Volume,
            SortKey::TotalSupply,
        ]
    }
}

/// Direction paired with the active sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header marker for the active sort column
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => " ↑",
            SortDirection::Descending => " ↓",
        }
    }
}
