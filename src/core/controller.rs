//! # Card List Controller
//!
//! Drives a [`CardList`] against a [`CatalogService`]. All state mutation
//! happens on the owner of the controller; the HTTP call runs on a tokio task
//! that only reports back through a channel.
//!
//! ```text
//! dispatch(Action) ──► update() ──► Effect::Fetch ──► tokio::spawn(fetch_cards)
//!        ▲                                                     │
//!        └──────────── Action::PageLoaded ◄── channel ◄────────┘
//! ```
//!
//! Cancelling (or dropping the controller) aborts the task. A completion that
//! was already queued still can't land: its ticket no longer matches. A task
//! that panics is reported to the reducer as a failed completion.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::{JoinError, JoinHandle};

use crate::catalog::{CatalogError, CatalogService};
use crate::core::action::{Action, Effect, FetchRequest, update};
use crate::core::state::CardList;

pub struct CardListController {
    state: CardList,
    service: Arc<dyn CatalogService>,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    in_flight: Option<InFlight>,
}

struct InFlight {
    request: FetchRequest,
    handle: JoinHandle<()>,
}

/// What woke `settle` up.
enum Wake {
    Message(Option<Action>),
    TaskDone(Result<(), JoinError>),
}

impl CardListController {
    pub fn new(service: Arc<dyn CatalogService>) -> Self {
        Self::with_state(service, CardList::new())
    }

    pub fn with_state(service: Arc<dyn CatalogService>, state: CardList) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            state,
            service,
            tx,
            rx,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &CardList {
        &self.state
    }

    /// Applies `action` and starts whatever fetch it asks for.
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, action: Action) {
        if matches!(action, Action::Cancel)
            && let Some(task) = self.in_flight.take()
        {
            task.handle.abort();
        }

        match update(&mut self.state, action) {
            Effect::Fetch(request) => {
                self.in_flight = Some(self.spawn_fetch(request));
            }
            Effect::None => {
                if self.state.operation.is_idle() {
                    self.in_flight = None;
                }
            }
        }
    }

    fn spawn_fetch(&self, request: FetchRequest) -> InFlight {
        info!(
            "Spawning fetch: ticket={}, page={}, filter={:?}, append={}",
            request.ticket, request.page, request.name_filter, request.append
        );

        let service = self.service.clone();
        let tx = self.tx.clone();
        let task_request = request.clone();

        let handle = tokio::spawn(async move {
            let request = task_request;
            let result = service
                .fetch_cards(
                    request.page,
                    request.page_size,
                    request.name_filter.as_deref(),
                )
                .await;
            if tx.send(Action::PageLoaded { request, result }).is_err() {
                warn!("Failed to deliver page: controller dropped");
            }
        });

        InFlight { request, handle }
    }

    /// Applies completions that have already arrived, without waiting.
    pub fn pump(&mut self) {
        while let Ok(action) = self.rx.try_recv() {
            debug!("Controller received: {:?}", action);
            self.dispatch(action);
        }
    }

    /// Waits until no fetch is in flight, applying completions as they arrive.
    pub async fn settle(&mut self) {
        while self.state.is_performing_operation() {
            let wake = match self.in_flight.as_mut() {
                Some(task) => tokio::select! {
                    biased;
                    received = self.rx.recv() => Wake::Message(received),
                    joined = &mut task.handle => Wake::TaskDone(joined),
                },
                None => Wake::Message(self.rx.recv().await),
            };

            match wake {
                Wake::Message(Some(action)) => {
                    debug!("Controller received: {:?}", action);
                    self.dispatch(action);
                }
                Wake::Message(None) => break,
                Wake::TaskDone(joined) => {
                    // A task that finished normally has already queued its page.
                    if let Some(task) = self.in_flight.take()
                        && let Err(error) = joined
                        && !error.is_cancelled()
                    {
                        warn!("Fetch task for ticket {} died: {}", task.request.ticket, error);
                        self.dispatch(Action::PageLoaded {
                            request: task.request,
                            result: Err(CatalogError::Interrupted(error.to_string())),
                        });
                    }
                }
            }
        }
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.dispatch(Action::SetSearchText(text.into()));
    }

    pub async fn load_initial(&mut self) {
        self.dispatch(Action::LoadInitial);
        self.settle().await;
    }

    pub async fn refresh(&mut self) {
        self.dispatch(Action::Refresh);
        self.settle().await;
    }

    pub async fn search(&mut self) {
        self.dispatch(Action::Search);
        self.settle().await;
    }

    pub async fn load_more(&mut self) {
        self.dispatch(Action::LoadMore);
        self.settle().await;
    }

    pub fn cancel(&mut self) {
        self.dispatch(Action::Cancel);
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(Action::DismissError);
    }
}

impl Drop for CardListController {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            debug!("Controller dropped with a fetch in flight; aborting");
            task.handle.abort();
        }
    }
}
