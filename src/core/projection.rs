//! # Card Projection
//!
//! `CardView` flattens a [`CatalogEntry`] into the handful of fields a card
//! screen actually shows, plus derived strings. The mapping is lossy:
//! abilities, legalities, retreat cost and friends are dropped, so
//! `CardView::from_entry(e).to_entry()` is not `e`.

use std::hash::{Hash, Hasher};

use crate::catalog::{
    Attack, CardImages, CatalogEntry, SetSummary, TcgPlayer, TcgPlayerPrices,
};

const SHARE_BASE_URL: &str = "https://pokemontcg.io/card";

#[derive(Debug, Clone, Default)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub hp: Option<String>,
    pub number: Option<String>,
    pub rarity: Option<String>,
    pub artist: Option<String>,
    pub supertype: Option<String>,
    pub types: Vec<String>,
    pub attacks: Vec<Attack>,
    pub small_image_url: Option<String>,
    pub large_image_url: Option<String>,
    pub set_name: Option<String>,
    pub set_series: Option<String>,
    pub set_total: Option<u32>,
    pub set_release_date: Option<String>,
    pub market_price: Option<f64>,
    pub is_favorited: bool,
}

impl CardView {
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        let set = entry.set.as_ref();
        let images = entry.images.as_ref();
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            hp: entry.hp.clone(),
            number: entry.number.clone(),
            rarity: entry.rarity.clone(),
            artist: entry.artist.clone(),
            supertype: entry.supertype.clone(),
            types: entry.types.clone().unwrap_or_default(),
            attacks: entry.attacks.clone().unwrap_or_default(),
            small_image_url: images.and_then(|i| i.small.clone()),
            large_image_url: images.and_then(|i| i.large.clone()),
            set_name: set.and_then(|s| s.name.clone()),
            set_series: set.and_then(|s| s.series.clone()),
            set_total: set.and_then(|s| s.total),
            set_release_date: set.and_then(|s| s.release_date.clone()),
            market_price: entry.market_price(),
            is_favorited: false,
        }
    }

    /// Rebuilds an entry from the flattened fields. Empty lists come back as
    /// `None`, and the set/price blocks only exist when their `has_*` holds.
    pub fn to_entry(&self) -> CatalogEntry {
        CatalogEntry {
            id: self.id.clone(),
            name: self.name.clone(),
            supertype: self.supertype.clone(),
            hp: self.hp.clone(),
            types: (!self.types.is_empty()).then(|| self.types.clone()),
            attacks: (!self.attacks.is_empty()).then(|| self.attacks.clone()),
            set: self.has_set_info().then(|| SetSummary {
                name: self.set_name.clone(),
                series: self.set_series.clone(),
                total: self.set_total,
                release_date: self.set_release_date.clone(),
                ..Default::default()
            }),
            number: self.number.clone(),
            artist: self.artist.clone(),
            rarity: self.rarity.clone(),
            images: Some(CardImages {
                small: self.small_image_url.clone(),
                large: self.large_image_url.clone(),
            }),
            tcgplayer: self.has_market_price().then(|| TcgPlayer {
                url: None,
                updated_at: None,
                prices: Some(TcgPlayerPrices {
                    market: self.market_price,
                    ..Default::default()
                }),
            }),
            ..Default::default()
        }
    }

    pub fn share_url(&self) -> String {
        format!("{SHARE_BASE_URL}/{}", self.id)
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn card_number(&self) -> Option<String> {
        self.number.as_ref().map(|n| format!("#{n}"))
    }

    pub fn display_set_name(&self) -> Option<String> {
        self.set_name.as_ref().map(|s| s.to_uppercase())
    }

    /// `#4 • Base`, falling back to whichever half exists, then the name.
    pub fn card_identifier(&self) -> String {
        match (self.card_number(), self.set_name.as_deref()) {
            (Some(number), Some(set)) => format!("{number} • {set}"),
            (Some(number), None) => number,
            (None, Some(set)) => set.to_string(),
            (None, None) => self.name.clone(),
        }
    }

    /// Whole dollars, truncated: 12.99 shows as `$12`.
    pub fn formatted_market_price(&self) -> Option<String> {
        self.market_price.map(|price| format!("${}", price.trunc() as i64))
    }

    pub fn types_string(&self) -> String {
        self.types.join(", ")
    }

    pub fn has_types(&self) -> bool {
        !self.types.is_empty()
    }

    pub fn has_attacks(&self) -> bool {
        !self.attacks.is_empty()
    }

    pub fn has_set_info(&self) -> bool {
        self.set_name.is_some()
    }

    pub fn has_market_price(&self) -> bool {
        self.market_price.is_some()
    }

    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    pub fn attack_count(&self) -> usize {
        self.attacks.len()
    }

    pub fn toggle_favorite(&mut self) {
        self.is_favorited = !self.is_favorited;
    }
}

impl From<&CatalogEntry> for CardView {
    fn from(entry: &CatalogEntry) -> Self {
        CardView::from_entry(entry)
    }
}

// Two views are the same card when id, name, number and set line up.
impl PartialEq for CardView {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.number == other.number
            && self.set_name == other.set_name
    }
}

impl Eq for CardView {}

impl Hash for CardView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
        self.number.hash(state);
        self.set_name.hash(state);
    }
}
