//! fintrack
//!
//! Terminal front end for the finance tracker: an interactive (or scripted)
//! shell over the Ledger Store. This crate carries the caller duties the
//! core leaves to its UI layer: confirming destructive operations, cascading
//! account deletion, and re-querying after every mutation.

pub mod cli;

use tracing_subscriber::EnvFilter;

/// Initializes logging for the process. Safe to call once at startup.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
