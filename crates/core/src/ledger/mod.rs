//! Ledger computations: period aggregation, member dues, imam salary
//! ledgers and balances.
//!
//! Everything here is a pure function of the records passed in and an
//! explicit `today`; nothing reads the clock or holds state between calls.

mod attribution;
mod balance;
mod balance_model;
mod dues;
mod dues_model;
pub mod period;

pub use attribution::PaymentAttribution;
pub use balance::compute_balance;
pub use balance_model::*;
pub use dues::{compute_all_dues, compute_all_imam_ledgers, compute_dues, compute_imam_ledger};
pub use dues_model::*;
pub use period::{
    aggregate_by_month, breakdown_by_category, enumerate_months, monthly_totals, sum_amounts,
    total_for_month, trailing_months, trailing_series, LedgerEntry, MonthlyPoint,
};

#[cfg(test)]
mod balance_tests;
