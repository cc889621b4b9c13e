//! agenda-core — record types and the cleaning pipeline for agenda-prep.
//!
//! This crate holds everything between the catalog fetch and the embedding
//! sink: the loosely-typed [`RawEvent`], the fixed-schema [`CanonicalEvent`],
//! and the layers that turn one into the other.
//!
//! # Architecture
//!
//! ```text
//! store::load_raw ──► Canonicalizer ──► store::save_clean ──► audit
//!                        │
//!                        ├── normalizer  (markup / whitespace cleanup)
//!                        └── timestamp   (ISO-8601 canonicalization)
//! ```
//!
//! The canonicalizer is a single synchronous pass; its dedup state lives on
//! the [`Canonicalizer`] value, never in a global.

pub mod audit;
pub mod canonicalizer;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod store;
pub mod timestamp;
pub mod types;

pub use canonicalizer::{
    canonicalize_all, CanonicalizeStats, Canonicalizer, DedupKey, DropReason, Outcome,
};
pub use error::{Error, Result};
pub use types::{CanonicalEvent, RawEvent};
