//! # Card List State
//!
//! Everything the card list screen knows, in one place. No I/O here.
//!
//! ```text
//! CardList
//! ├── entries: Vec<CatalogEntry>     // accumulated results, server order
//! ├── current_page: u32              // last page applied (1-based)
//! ├── page_size: u32                 // results requested per page
//! ├── total_count: u32               // matches across all pages
//! ├── has_more_pages: bool           // page * page_size < total_count
//! ├── search_text: String            // what the user typed
//! ├── active_filter: Option<String>  // filter behind the shown entries
//! ├── operation: Operation           // the single in-flight fetch, if any
//! ├── error_message: Option<String>  // last failure
//! ├── show_error: bool               // whether the failure is on screen
//! └── last_ticket: u64               // ticket of the most recent fetch
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::catalog::CatalogEntry;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

pub const DEFAULT_TITLE: &str = "Pokédex";
pub const SEARCH_TITLE: &str = "Search Results";

/// The fetch currently in flight. At most one exists per `CardList`.
///
/// Each variant carries the ticket of its request; completions with any
/// other ticket are stale and get dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    #[default]
    Idle,
    FetchingFirstPage {
        ticket: u64,
    },
    Searching {
        ticket: u64,
    },
    FetchingMore {
        ticket: u64,
    },
}

impl Operation {
    pub fn ticket(&self) -> Option<u64> {
        match self {
            Operation::Idle => None,
            Operation::FetchingFirstPage { ticket }
            | Operation::Searching { ticket }
            | Operation::FetchingMore { ticket } => Some(*ticket),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Operation::Idle)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardList {
    pub entries: Vec<CatalogEntry>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u32,
    pub has_more_pages: bool,
    pub search_text: String,
    /// Name filter that produced `entries`. `LoadMore` keeps paging it even
    /// if `search_text` has been edited since.
    pub active_filter: Option<String>,
    pub operation: Operation,
    pub error_message: Option<String>,
    pub show_error: bool,
    pub last_ticket: u64,
}

impl Default for CardList {
    fn default() -> Self {
        Self::new()
    }
}

impl CardList {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            has_more_pages: true,
            search_text: String::new(),
            active_filter: None,
            operation: Operation::Idle,
            error_message: None,
            show_error: false,
            last_ticket: 0,
        }
    }

    /// A list whose first load will be a search for `term`.
    pub fn with_search_text(term: impl Into<String>) -> Self {
        Self {
            search_text: term.into(),
            ..Self::new()
        }
    }

    /// Zero is bumped to one; the API rejects empty pages.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.operation, Operation::FetchingFirstPage { .. })
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.operation, Operation::Searching { .. })
    }

    pub fn is_loading_more(&self) -> bool {
        matches!(self.operation, Operation::FetchingMore { .. })
    }

    pub fn is_performing_operation(&self) -> bool {
        self.is_loading() || self.is_searching() || self.is_loading_more()
    }

    pub fn result_count_text(&self) -> String {
        match self.total_count {
            0 => "No cards found".to_string(),
            1 => "1 card".to_string(),
            n => format!("{n} cards"),
        }
    }

    pub fn display_title(&self) -> &'static str {
        if self.search_text.is_empty() {
            DEFAULT_TITLE
        } else {
            SEARCH_TITLE
        }
    }
}
