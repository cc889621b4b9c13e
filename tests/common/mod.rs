//! Shared test utilities for agenda-prep integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod builders;
pub mod fake_catalog_api;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
