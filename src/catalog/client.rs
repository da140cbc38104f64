//! reqwest-backed client for the Pokémon TCG REST API (v2).
//!
//! One GET per call, no retries, no caching. Every failure is mapped onto
//! [`CatalogError`] and handed back to the caller untouched.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::catalog::{
    CatalogEntry, CatalogError, CatalogService, DataEnvelope, PageResponse, SetSummary,
};

pub const DEFAULT_BASE_URL: &str = "https://api.pokemontcg.io/v2";

/// How much of an undecodable body makes it into the log.
const RAW_BODY_LOG_LIMIT: usize = 500;

// ============================================================================
// Query Building
// ============================================================================

/// Builds the prefix-wildcard name query (`name:"<term>*"`).
/// Returns None for an absent or empty filter so the `q` parameter is omitted.
pub fn name_query(name_filter: Option<&str>) -> Option<String> {
    let term = name_filter.filter(|t| !t.is_empty())?;
    let escaped = term.replace('\\', "\\\\").replace('"', "\\\"");
    Some(format!("name:\"{escaped}*\""))
}

/// Builds the exact-match set filter (`set.id:<id>`).
pub fn set_query(set_id: &str) -> String {
    format!("set.id:{set_id}")
}

fn page_params(page: u32, page_size: u32) -> Result<[(&'static str, String); 2], CatalogError> {
    if page == 0 {
        return Err(CatalogError::InvalidRequest("page must be >= 1".to_string()));
    }
    if page_size == 0 {
        return Err(CatalogError::InvalidRequest(
            "pageSize must be >= 1".to_string(),
        ));
    }
    Ok([("page", page.to_string()), ("pageSize", page_size.to_string())])
}

/// A blank id would address the list endpoint instead of one resource.
fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str, CatalogError> {
    if id.trim().is_empty() {
        return Err(CatalogError::InvalidRequest(format!("{what} must not be empty")));
    }
    Ok(id)
}

// ============================================================================
// Client
// ============================================================================

pub struct TcgApiClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl TcgApiClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    /// Sends `X-Api-Key` with every request when set.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base path and `params` to the query string.
    /// Segments are percent-encoded, so ids can't escape their path slot.
    fn endpoint(&self, segments: &[&str], params: &[(&str, String)]) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| CatalogError::InvalidRequest(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| {
                CatalogError::InvalidRequest(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    pub(crate) fn cards_url(
        &self,
        page: u32,
        page_size: u32,
        name_filter: Option<&str>,
    ) -> Result<Url, CatalogError> {
        let mut params = page_params(page, page_size)?.to_vec();
        if let Some(q) = name_query(name_filter) {
            params.push(("q", q));
        }
        self.endpoint(&["cards"], &params)
    }

    pub(crate) fn card_url(&self, id: &str) -> Result<Url, CatalogError> {
        self.endpoint(&["cards", require_id(id, "card id")?], &[])
    }

    pub(crate) fn sets_url(
        &self,
        page: u32,
        page_size: u32,
        name_filter: Option<&str>,
    ) -> Result<Url, CatalogError> {
        let mut params = page_params(page, page_size)?.to_vec();
        if let Some(q) = name_query(name_filter) {
            params.push(("q", q));
        }
        self.endpoint(&["sets"], &params)
    }

    pub(crate) fn set_url(&self, id: &str) -> Result<Url, CatalogError> {
        self.endpoint(&["sets", require_id(id, "set id")?], &[])
    }

    pub(crate) fn cards_by_set_url(
        &self,
        set_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Url, CatalogError> {
        let mut params = vec![("q", set_query(require_id(set_id, "set id")?))];
        params.extend(page_params(page, page_size)?);
        self.endpoint(&["cards"], &params)
    }

    /// Issues the GET and decodes a 200 body as `T`.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        info!("Fetching: {}", url);

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await.map_err(|e| {
            warn!("Transport failure: {}", e);
            CatalogError::Transport(e)
        })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("API error ({}): {}", status.as_u16(), body);
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(CatalogError::Transport)?;
        match serde_json::from_str::<T>(&body) {
            Ok(value) => Ok(value),
            Err(source) => {
                warn!("Decoding error: {}", source);
                let prefix: String = body.chars().take(RAW_BODY_LOG_LIMIT).collect();
                warn!("Raw JSON: {}...", prefix);
                Err(CatalogError::Decoding { body, source })
            }
        }
    }
}

#[async_trait]
impl CatalogService for TcgApiClient {
    async fn fetch_cards(
        &self,
        page: u32,
        page_size: u32,
        name_filter: Option<&str>,
    ) -> Result<PageResponse<CatalogEntry>, CatalogError> {
        let url = self.cards_url(page, page_size, name_filter)?;
        let response: PageResponse<CatalogEntry> = self.get_json(url).await?;
        info!(
            "Fetched {} cards (page {}, {} total)",
            response.data.len(),
            response.page,
            response.total_count
        );
        Ok(response)
    }

    async fn fetch_card(&self, id: &str) -> Result<CatalogEntry, CatalogError> {
        let url = self.card_url(id)?;
        let envelope: DataEnvelope<CatalogEntry> = self.get_json(url).await?;
        Ok(envelope.data)
    }

    async fn fetch_sets(
        &self,
        page: u32,
        page_size: u32,
        name_filter: Option<&str>,
    ) -> Result<PageResponse<SetSummary>, CatalogError> {
        let url = self.sets_url(page, page_size, name_filter)?;
        let response: PageResponse<SetSummary> = self.get_json(url).await?;
        info!(
            "Fetched {} sets (page {}, {} total)",
            response.data.len(),
            response.page,
            response.total_count
        );
        Ok(response)
    }

    async fn fetch_set(&self, id: &str) -> Result<SetSummary, CatalogError> {
        let url = self.set_url(id)?;
        let envelope: DataEnvelope<SetSummary> = self.get_json(url).await?;
        info!(
            "Fetched set: {}",
            envelope.data.name.as_deref().unwrap_or("Unknown")
        );
        Ok(envelope.data)
    }

    async fn fetch_cards_by_set(
        &self,
        set_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PageResponse<CatalogEntry>, CatalogError> {
        let url = self.cards_by_set_url(set_id, page, page_size)?;
        let response: PageResponse<CatalogEntry> = self.get_json(url).await?;
        info!(
            "Fetched {} cards from set {}",
            response.data.len(),
            set_id
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_name_query_wraps_and_wildcards() {
        assert_eq!(
            name_query(Some("Pikachu")).as_deref(),
            Some("name:\"Pikachu*\"")
        );
        assert_eq!(
            name_query(Some("Mr. Mime")).as_deref(),
            Some("name:\"Mr. Mime*\"")
        );
    }

    #[test]
    fn test_name_query_escapes_quotes() {
        assert_eq!(
            name_query(Some(r#"Farfetch"d"#)).as_deref(),
            Some(r#"name:"Farfetch\"d*""#)
        );
    }

    #[test]
    fn test_name_query_omitted_when_empty() {
        assert!(name_query(None).is_none());
        assert!(name_query(Some("")).is_none());
    }

    #[test]
    fn test_cards_url_carries_page_params() {
        let client = TcgApiClient::new(None);
        for (page, page_size) in [(1, 1), (1, 20), (3, 250), (17, 5)] {
            let url = client.cards_url(page, page_size, None).unwrap();
            assert_eq!(url.path(), "/v2/cards");
            assert_eq!(query_value(&url, "page"), Some(page.to_string()));
            assert_eq!(query_value(&url, "pageSize"), Some(page_size.to_string()));
            assert!(query_value(&url, "q").is_none());
        }
    }

    #[test]
    fn test_cards_url_with_name_filter() {
        let client = TcgApiClient::new(None);
        let url = client.cards_url(1, 20, Some("Pikachu")).unwrap();
        assert_eq!(query_value(&url, "q").as_deref(), Some("name:\"Pikachu*\""));

        let url = client.cards_url(1, 20, Some("")).unwrap();
        assert!(query_value(&url, "q").is_none());
    }

    #[test]
    fn test_zero_page_is_invalid_request() {
        let client = TcgApiClient::new(None);
        assert!(matches!(
            client.cards_url(0, 20, None),
            Err(CatalogError::InvalidRequest(_))
        ));
        assert!(matches!(
            client.sets_url(1, 0, None),
            Err(CatalogError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_bad_base_url_is_invalid_request() {
        let client = TcgApiClient::new(Some("not a url".to_string()));
        assert!(matches!(
            client.card_url("xy1-1"),
            Err(CatalogError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_single_resource_urls() {
        let client = TcgApiClient::new(Some("http://localhost:9000/v2/".to_string()));
        assert_eq!(
            client.card_url("xy1-1").unwrap().as_str(),
            "http://localhost:9000/v2/cards/xy1-1"
        );
        assert_eq!(
            client.set_url("swsh4").unwrap().as_str(),
            "http://localhost:9000/v2/sets/swsh4"
        );
    }

    #[test]
    fn test_blank_ids_are_invalid_request() {
        let client = TcgApiClient::new(None);
        for id in ["", "  "] {
            assert!(matches!(client.card_url(id), Err(CatalogError::InvalidRequest(_))));
            assert!(matches!(client.set_url(id), Err(CatalogError::InvalidRequest(_))));
            assert!(matches!(
                client.cards_by_set_url(id, 1, 20),
                Err(CatalogError::InvalidRequest(_))
            ));
        }
        let err = client.card_url("").unwrap_err();
        assert_eq!(err.to_string(), "Invalid URL: card id must not be empty");
    }

    #[test]
    fn test_card_id_is_path_encoded() {
        let client = TcgApiClient::new(None);
        let url = client.card_url("../sets/x").unwrap();
        assert_eq!(url.path(), "/v2/cards/..%2Fsets%2Fx");
    }

    #[test]
    fn test_cards_by_set_url() {
        let client = TcgApiClient::new(None);
        let url = client.cards_by_set_url("swsh4", 2, 50).unwrap();
        assert_eq!(url.path(), "/v2/cards");
        assert_eq!(query_value(&url, "q").as_deref(), Some("set.id:swsh4"));
        assert_eq!(query_value(&url, "page").as_deref(), Some("2"));
        assert_eq!(query_value(&url, "pageSize").as_deref(), Some("50"));
    }

    #[test]
    fn test_empty_api_key_is_dropped() {
        let client = TcgApiClient::new(None).with_api_key(Some(String::new()));
        assert!(client.api_key.is_none());
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }
}
