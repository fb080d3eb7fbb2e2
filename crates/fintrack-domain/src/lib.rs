//! fintrack-domain
//!
//! Pure record models for the finance tracker (Account, Transaction,
//! Category, Goal, Bill, Settings). No I/O, no storage. Only data types,
//! enums, and recurrence date math.

pub mod account;
pub mod bill;
pub mod category;
pub mod common;
pub mod goal;
pub mod recurrence;
pub mod settings;
pub mod transaction;

pub use account::*;
pub use bill::*;
pub use category::*;
pub use common::*;
pub use goal::*;
pub use recurrence::*;
pub use settings::*;
pub use transaction::*;
