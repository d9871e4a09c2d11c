//! # meta-core
//!
//! Pure logic for storemeta (no I/O, instant tests).
//!
//! This crate implements the editing and synchronization bookkeeping for
//! store listing localizations without any network or disk I/O.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about which records are pending
//!
//! The actual I/O (HTTP, credential files) is performed by `meta-client`,
//! which submits the batches produced by [`SyncState`] and feeds the results
//! back in.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod locale;
pub mod pagination;
pub mod record;
pub mod report;
pub mod state;

pub use error::CoreError;
pub use locale::{compare_locales, resolve_primary, sort_locales};
pub use pagination::PageAccumulator;
pub use record::{normalize, EditableRecord};
pub use report::{ProgressCounter, SyncOutcome, SyncProgress, SyncReport};
pub use state::SyncState;
