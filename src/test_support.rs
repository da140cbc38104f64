//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::catalog::{CatalogEntry, CatalogError, CatalogService, PageResponse, SetSummary};

pub fn sample_entry(id: &str, name: &str) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

/// A page whose entries are named after their ids.
pub fn page_of(ids: &[&str], page: u32, page_size: u32, total_count: u32) -> PageResponse<CatalogEntry> {
    PageResponse {
        data: ids.iter().map(|id| sample_entry(id, id)).collect(),
        page,
        page_size,
        count: ids.len() as u32,
        total_count,
    }
}

/// One recorded `fetch_cards` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardsCall {
    pub page: u32,
    pub page_size: u32,
    pub name_filter: Option<String>,
}

/// Flags a fetch future that was dropped before it finished (i.e. aborted).
struct AbandonGuard {
    flag: Arc<AtomicBool>,
    finished: bool,
}

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.flag.store(true, Ordering::SeqCst);
        }
    }
}

/// A catalog that replays scripted `fetch_cards` results in order.
///
/// With a gate set, every `fetch_cards` call parks until the gate is
/// notified, which keeps a fetch in flight for as long as a test needs.
#[derive(Default)]
pub struct ScriptedCatalog {
    responses: Mutex<VecDeque<Result<PageResponse<CatalogEntry>, CatalogError>>>,
    calls: Mutex<Vec<CardsCall>>,
    gate: Option<Arc<Notify>>,
    abandoned: Arc<AtomicBool>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push(&self, result: Result<PageResponse<CatalogEntry>, CatalogError>) {
        self.responses.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<CardsCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// True once a `fetch_cards` future has been dropped mid-flight.
    pub fn was_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogService for ScriptedCatalog {
    async fn fetch_cards(
        &self,
        page: u32,
        page_size: u32,
        name_filter: Option<&str>,
    ) -> Result<PageResponse<CatalogEntry>, CatalogError> {
        let mut guard = AbandonGuard {
            flag: self.abandoned.clone(),
            finished: false,
        };
        self.calls.lock().unwrap().push(CardsCall {
            page,
            page_size,
            name_filter: name_filter.map(str::to_string),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        guard.finished = true;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(CatalogError::Api {
                    status: 500,
                    body: "no scripted response".to_string(),
                })
            })
    }

    async fn fetch_card(&self, id: &str) -> Result<CatalogEntry, CatalogError> {
        Ok(sample_entry(id, id))
    }

    async fn fetch_sets(
        &self,
        page: u32,
        page_size: u32,
        _name_filter: Option<&str>,
    ) -> Result<PageResponse<SetSummary>, CatalogError> {
        Ok(PageResponse {
            data: Vec::new(),
            page,
            page_size,
            count: 0,
            total_count: 0,
        })
    }

    async fn fetch_set(&self, id: &str) -> Result<SetSummary, CatalogError> {
        Ok(SetSummary {
            id: id.to_string(),
            ..Default::default()
        })
    }

    async fn fetch_cards_by_set(
        &self,
        _set_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PageResponse<CatalogEntry>, CatalogError> {
        self.fetch_cards(page, page_size, None).await
    }
}
