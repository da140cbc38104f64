//! # Core Application Logic
//!
//! This module contains the card browser's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • CardList (state)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • CardView (projection)│
//!                    │                         │
//!                    │  No UI. One fetch task. │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    CLI     │      │  Catalog   │      │   Other    │
//!     │  Adapter   │      │  Client    │      │  Adapters  │
//!     │   (clap)   │      │ (reqwest)  │      │  (future)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `CardList`, everything the list screen knows
//! - [`action`]: `Action`, `Effect` and the `update()` reducer
//! - [`controller`]: runs effects on tokio and feeds completions back
//! - [`projection`]: `CardView`, the flattened display record
//! - [`energy`]: type → color / icon / symbol tables
//! - [`config`]: config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod controller;
pub mod energy;
pub mod projection;
pub mod state;
