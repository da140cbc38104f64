//! # CLI Adapter
//!
//! Turns subcommands into controller actions and client calls, and renders
//! the results as text (or JSON). This is the only module that writes
//! user-facing output; everything it shows comes from `core` and `catalog`.

pub mod render;

use std::error::Error;
use std::sync::Arc;

use clap::Subcommand;
use log::info;
use serde::Serialize;

use crate::OutputFormat;
use crate::catalog::{CatalogService, TcgApiClient};
use crate::core::config::ResolvedConfig;
use crate::core::controller::CardListController;
use crate::core::state::CardList;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Browse cards, optionally filtered by name prefix
    Cards {
        /// Only cards whose name starts with this
        #[arg(short, long)]
        search: Option<String>,
        /// How many pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show one card in detail
    Card { id: String },
    /// List sets, optionally filtered by name prefix
    Sets {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one set
    Set { id: String },
    /// List the cards in a set
    SetCards {
        set_id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

/// How the output should look.
#[derive(Debug, Clone, Copy)]
pub struct Presentation {
    pub format: OutputFormat,
    pub color: bool,
}

/// Build a client from a resolved config's base URL and credentials.
pub fn build_service(config: &ResolvedConfig) -> Arc<dyn CatalogService> {
    Arc::new(
        TcgApiClient::new(Some(config.base_url.clone())).with_api_key(config.api_key.clone()),
    )
}

fn to_json<T: Serialize>(value: &T) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}

/// Loads the first page (or search results), then keeps paging until
/// `pages` pages are in or the results run out.
pub async fn browse_cards(
    service: Arc<dyn CatalogService>,
    page_size: u32,
    search: Option<String>,
    pages: u32,
) -> CardList {
    let state = match search {
        Some(term) => CardList::with_search_text(term),
        None => CardList::new(),
    }
    .with_page_size(page_size);

    let mut controller = CardListController::with_state(service, state);
    controller.refresh().await;

    for _ in 1..pages.max(1) {
        if !controller.state().has_more_pages || controller.state().show_error {
            break;
        }
        controller.load_more().await;
    }

    controller.state().clone()
}

/// Runs one subcommand and returns what should be printed.
pub async fn run(
    command: Command,
    config: &ResolvedConfig,
    presentation: Presentation,
) -> Result<String, Box<dyn Error>> {
    let service = build_service(config);
    let json = matches!(presentation.format, OutputFormat::Json);
    info!("Running {:?} against {}", command, config.base_url);

    match command {
        Command::Cards { search, pages } => {
            let state = browse_cards(service, config.page_size, search, pages).await;
            if state.show_error && state.is_empty() {
                return Err(state
                    .error_message
                    .unwrap_or_else(|| "unknown error".to_string())
                    .into());
            }
            let mut out = if json {
                to_json(&state.entries)?
            } else {
                render::card_list(&state, presentation.color)
            };
            if let Some(message) = state.error_message.filter(|_| state.show_error) {
                out.push_str(&format!("warning: {message}\n"));
            }
            Ok(out)
        }
        Command::Card { id } => {
            let entry = service.fetch_card(&id).await?;
            if json {
                to_json(&entry)
            } else {
                Ok(render::card_detail(&entry, presentation.color))
            }
        }
        Command::Sets { search, page } => {
            let response = service
                .fetch_sets(page, config.page_size, search.as_deref())
                .await?;
            if json {
                to_json(&response)
            } else {
                Ok(render::set_list(&response))
            }
        }
        Command::Set { id } => {
            let set = service.fetch_set(&id).await?;
            if json {
                to_json(&set)
            } else {
                Ok(render::set_detail(&set))
            }
        }
        Command::SetCards { set_id, page } => {
            let response = service
                .fetch_cards_by_set(&set_id, page, config.page_size)
                .await?;
            if json {
                to_json(&response)
            } else {
                Ok(render::entry_page(&response, presentation.color))
            }
        }
    }
}
