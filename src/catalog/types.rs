//! Wire types for the Pokémon TCG catalog API.
//!
//! Every field except `id` is optional on the wire. Absent and `null` both
//! decode to the unset representation (`None`, or an empty string for the few
//! fields we keep as plain `String`), never to a decode error.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Treats `null` the same as a missing field for non-`Option` fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Envelopes
// ============================================================================

/// A page of results from a list endpoint (`/cards`, `/sets`).
///
/// `data` keeps the server order. `count == data.len()` for well-formed pages.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub count: u32,
    pub total_count: u32,
}

impl<T> PageResponse<T> {
    /// True when pages beyond `page` still hold results for this query.
    pub fn has_more_after(&self, page: u32) -> bool {
        (page as u64) * (self.page_size as u64) < self.total_count as u64
    }
}

/// Envelope for single-resource endpoints (`/cards/{id}`, `/sets/{id}`).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DataEnvelope<T> {
    pub data: T,
}

// ============================================================================
// Catalog Entry (a card)
// ============================================================================

/// A single card. Identity is the `id` field.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub supertype: Option<String>,
    #[serde(default)]
    pub subtypes: Option<Vec<String>>,
    #[serde(default)]
    pub hp: Option<String>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub evolves_from: Option<String>,
    #[serde(default)]
    pub evolves_to: Option<Vec<String>>,
    #[serde(default)]
    pub rules: Option<Vec<String>>,
    #[serde(default)]
    pub abilities: Option<Vec<Ability>>,
    #[serde(default)]
    pub attacks: Option<Vec<Attack>>,
    #[serde(default)]
    pub weaknesses: Option<Vec<TypeModifier>>,
    #[serde(default)]
    pub resistances: Option<Vec<TypeModifier>>,
    #[serde(default)]
    pub retreat_cost: Option<Vec<String>>,
    #[serde(default)]
    pub converted_retreat_cost: Option<u32>,
    #[serde(default)]
    pub set: Option<SetSummary>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub national_pokedex_numbers: Option<Vec<u32>>,
    #[serde(default)]
    pub legalities: Option<Legalities>,
    #[serde(default)]
    pub images: Option<CardImages>,
    #[serde(default)]
    pub tcgplayer: Option<TcgPlayer>,
    #[serde(default)]
    pub cardmarket: Option<CardMarket>,
}

impl PartialEq for CatalogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CatalogEntry {}

impl CatalogEntry {
    /// TCGplayer market price, if the entry carries one.
    pub fn market_price(&self) -> Option<f64> {
        self.tcgplayer.as_ref()?.prices.as_ref()?.market
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Ability {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attack {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cost: Option<Vec<String>>,
    #[serde(default)]
    pub converted_energy_cost: Option<u32>,
    #[serde(default)]
    pub damage: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A weakness or resistance: an energy type and its multiplier (`×2`, `-30`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypeModifier {
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Legalities {
    #[serde(default)]
    pub unlimited: Option<String>,
    #[serde(default)]
    pub standard: Option<String>,
    #[serde(default)]
    pub expanded: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CardImages {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TcgPlayer {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub prices: Option<TcgPlayerPrices>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TcgPlayerPrices {
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub mid: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub market: Option<f64>,
    #[serde(default)]
    pub direct_low: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardMarket {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub prices: Option<CardMarketPrices>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardMarketPrices {
    #[serde(default)]
    pub average_sell_price: Option<f64>,
    #[serde(default)]
    pub low_price: Option<f64>,
    #[serde(default)]
    pub trend_price: Option<f64>,
    #[serde(default)]
    pub german_pro_low: Option<f64>,
    #[serde(default)]
    pub suggested_price: Option<f64>,
    #[serde(default)]
    pub reverse_holo_sell: Option<f64>,
    #[serde(default)]
    pub reverse_holo_low: Option<f64>,
    #[serde(default)]
    pub reverse_holo_trend: Option<f64>,
    #[serde(default)]
    pub low_price_ex_plus: Option<f64>,
    #[serde(default)]
    pub avg1: Option<f64>,
    #[serde(default)]
    pub avg7: Option<f64>,
    #[serde(default)]
    pub avg30: Option<f64>,
    #[serde(default)]
    pub reverse_holo_avg1: Option<f64>,
    #[serde(default)]
    pub reverse_holo_avg7: Option<f64>,
    #[serde(default)]
    pub reverse_holo_avg30: Option<f64>,
}

// ============================================================================
// Set Summary
// ============================================================================

/// A named release grouping cards. Also used as a card's `set` reference.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SetSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub printed_total: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub legalities: Option<Legalities>,
    #[serde(default)]
    pub ptcgo_code: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub images: Option<SetImages>,
}

impl PartialEq for SetSummary {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SetSummary {}

impl SetSummary {
    /// Parses `release_date` (`YYYY/MM/DD` on the wire).
    pub fn release_date(&self) -> Option<NaiveDate> {
        let raw = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y/%m/%d").ok()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SetImages {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}
