//! Masjid Core - Domain records and the ledger engine.
//!
//! This crate holds the business logic of the masjid donation tracker:
//! member dues, imam salary ledgers, period aggregation and balances. It
//! performs no I/O; records come in through the traits in [`dashboard`],
//! [`recycle_bin`] and [`auth`], which the `api-client` crate implements.

pub mod auth;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod finance;
pub mod imams;
pub mod ledger;
pub mod members;
pub mod month;
pub mod payments;
pub mod recycle_bin;
pub mod settings;
pub mod utils;

pub use month::MonthKey;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
