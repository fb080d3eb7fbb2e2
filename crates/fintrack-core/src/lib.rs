//! fintrack-core
//!
//! The Ledger Store: single-owner CRUD over the finance collections with
//! balance-invariant maintenance, derived aggregates recomputed on every
//! query, and persistence through a pluggable blob store. No terminal I/O.

pub mod alerts;
pub mod clock;
pub mod error;
pub mod report;
pub mod storage;
pub mod store;

pub use alerts::*;
pub use clock::Clock;
pub use error::CoreError;
pub use report::*;
pub use storage::{BlobStore, Collection, MemoryBlobStore};
pub use store::LedgerStore;
