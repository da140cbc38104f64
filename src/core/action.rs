//! # Actions
//!
//! Everything that can happen to the card list becomes an `Action`.
//! User pulls to refresh? That's `Action::Refresh`.
//! The API answers? That's `Action::PageLoaded { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing the I/O the caller should start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! A new fetch is only ever issued from `Operation::Idle`, so at most one is
//! in flight. Requests made while busy are dropped, not queued.

use log::{debug, info, warn};

use crate::catalog::{CatalogEntry, CatalogError, PageResponse};
use crate::core::state::{CardList, Operation};

/// Parameters for one `fetch_cards` call, tagged with the ticket it answers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: u64,
    pub page: u32,
    pub page_size: u32,
    pub name_filter: Option<String>,
    /// Append to `entries` instead of replacing them.
    pub append: bool,
}

#[derive(Debug)]
pub enum Action {
    SetSearchText(String),
    LoadInitial,
    /// Reloads whatever mode the search text implies.
    Refresh,
    Search,
    LoadMore,
    PageLoaded {
        request: FetchRequest,
        result: Result<PageResponse<CatalogEntry>, CatalogError>,
    },
    DismissError,
    /// Abandons the in-flight fetch. Its completion, if it ever arrives, is ignored.
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Fetch(FetchRequest),
}

pub fn update(state: &mut CardList, action: Action) -> Effect {
    match action {
        Action::SetSearchText(text) => {
            state.search_text = text;
            Effect::None
        }
        Action::LoadInitial => load_initial(state),
        Action::Refresh => {
            if state.search_text.is_empty() {
                load_initial(state)
            } else {
                search(state)
            }
        }
        Action::Search => search(state),
        Action::LoadMore => load_more(state),
        Action::PageLoaded { request, result } => {
            page_loaded(state, request, result);
            Effect::None
        }
        Action::DismissError => {
            state.show_error = false;
            Effect::None
        }
        Action::Cancel => {
            if let Some(ticket) = state.operation.ticket() {
                info!("Cancelling fetch (ticket {})", ticket);
                state.operation = Operation::Idle;
            }
            Effect::None
        }
    }
}

fn next_ticket(state: &mut CardList) -> u64 {
    state.last_ticket += 1;
    state.last_ticket
}

/// Shared reset for first-page fetches (initial load and search).
fn begin_first_page(state: &mut CardList, name_filter: Option<String>) -> Effect {
    let ticket = next_ticket(state);
    state.operation = if name_filter.is_some() {
        Operation::Searching { ticket }
    } else {
        Operation::FetchingFirstPage { ticket }
    };
    state.error_message = None;
    state.show_error = false;
    state.current_page = 1;
    state.has_more_pages = true;

    Effect::Fetch(FetchRequest {
        ticket,
        page: 1,
        page_size: state.page_size,
        name_filter,
        append: false,
    })
}

fn load_initial(state: &mut CardList) -> Effect {
    if state.is_performing_operation() {
        debug!("LoadInitial ignored: {:?} in flight", state.operation);
        return Effect::None;
    }
    begin_first_page(state, None)
}

fn search(state: &mut CardList) -> Effect {
    if state.search_text.is_empty() {
        return load_initial(state);
    }
    if state.is_performing_operation() {
        debug!("Search ignored: {:?} in flight", state.operation);
        return Effect::None;
    }
    let term = state.search_text.clone();
    begin_first_page(state, Some(term))
}

fn load_more(state: &mut CardList) -> Effect {
    if state.is_performing_operation() {
        debug!("LoadMore ignored: {:?} in flight", state.operation);
        return Effect::None;
    }
    if !state.has_more_pages {
        debug!("LoadMore ignored: no more pages");
        return Effect::None;
    }

    let ticket = next_ticket(state);
    state.operation = Operation::FetchingMore { ticket };

    Effect::Fetch(FetchRequest {
        ticket,
        page: state.current_page + 1,
        page_size: state.page_size,
        name_filter: state.active_filter.clone(),
        append: true,
    })
}

fn page_loaded(
    state: &mut CardList,
    request: FetchRequest,
    result: Result<PageResponse<CatalogEntry>, CatalogError>,
) {
    if state.operation.ticket() != Some(request.ticket) {
        debug!(
            "Discarding stale completion (ticket {}, in flight {:?})",
            request.ticket, state.operation
        );
        return;
    }
    state.operation = Operation::Idle;

    match result {
        Ok(response) => {
            let has_more = response.has_more_after(request.page);
            info!(
                "Applied page {} ({} entries, append={}, {} total)",
                request.page,
                response.data.len(),
                request.append,
                response.total_count
            );
            if request.append {
                state.entries.extend(response.data);
            } else {
                state.entries = response.data;
                state.active_filter = request.name_filter;
            }
            state.current_page = request.page;
            state.total_count = response.total_count;
            state.has_more_pages = has_more;
        }
        Err(e) => {
            warn!("Fetch for page {} failed: {}", request.page, e);
            state.error_message = Some(e.to_string());
            state.show_error = true;
        }
    }
}
