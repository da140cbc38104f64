use std::fmt;

use async_trait::async_trait;

use super::types::{CatalogEntry, PageResponse, SetSummary};

/// Errors that can occur while talking to the catalog API.
/// The client never recovers from these; callers decide what to show.
#[derive(Debug)]
pub enum CatalogError {
    /// The request URL could not be built (bad base URL, zero page). Indicates a caller bug.
    InvalidRequest(String),
    /// Connection-level failure before any response arrived.
    Transport(reqwest::Error),
    /// The server answered with something other than 200.
    Api { status: u16, body: String },
    /// The body did not match the expected schema.
    Decoding {
        body: String,
        source: serde_json::Error,
    },
    /// The fetch task died before reporting a result.
    Interrupted(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::InvalidRequest(msg) => write!(f, "Invalid URL: {msg}"),
            CatalogError::Transport(e) => write!(f, "Network error: {e}"),
            CatalogError::Api { status, body } => write!(f, "API Error ({status}): {body}"),
            CatalogError::Decoding { source, .. } => {
                write!(f, "Failed to decode response: {source}")
            }
            CatalogError::Interrupted(msg) => write!(f, "Request interrupted: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Transport(e) => Some(e),
            CatalogError::Decoding { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Read-only access to the card catalog.
///
/// `page` and `page_size` are 1-based and must be non-zero. An empty
/// `name_filter` is treated the same as `None`.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn fetch_cards(
        &self,
        page: u32,
        page_size: u32,
        name_filter: Option<&str>,
    ) -> Result<PageResponse<CatalogEntry>, CatalogError>;

    async fn fetch_card(&self, id: &str) -> Result<CatalogEntry, CatalogError>;

    async fn fetch_sets(
        &self,
        page: u32,
        page_size: u32,
        name_filter: Option<&str>,
    ) -> Result<PageResponse<SetSummary>, CatalogError>;

    async fn fetch_set(&self, id: &str) -> Result<SetSummary, CatalogError>;

    async fn fetch_cards_by_set(
        &self,
        set_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PageResponse<CatalogEntry>, CatalogError>;
}
