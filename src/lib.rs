//! agenda-prep — harvest public events and prepare them for embedding.
//!
//! This crate wires the workspace layers together and exposes the command
//! implementations so that integration tests can drive them directly.
//!
//! # Architecture
//!
//! ```text
//! CatalogClient ──► raw dataset ──► Canonicalizer ──► clean dataset ──► audit
//!  (agenda-feeds)     (store)        (agenda-core)       (store)
//! ```
//!
//! Fetching is async and strictly sequential; cleaning is a synchronous
//! single pass.

pub mod commands;

pub use agenda_core::audit::AuditReport;
pub use agenda_core::config::Config;
pub use agenda_core::{CanonicalEvent, CanonicalizeStats, Canonicalizer, RawEvent};
pub use agenda_feeds::{CatalogClient, FeedError};
