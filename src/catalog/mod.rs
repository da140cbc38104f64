pub mod client;
pub mod service;
pub mod types;

pub use client::{DEFAULT_BASE_URL, TcgApiClient};
pub use service::{CatalogError, CatalogService};
pub use types::{
    Ability, Attack, CardImages, CardMarket, CardMarketPrices, CatalogEntry, DataEnvelope,
    Legalities, PageResponse, SetImages, SetSummary, TcgPlayer, TcgPlayerPrices, TypeModifier,
};
