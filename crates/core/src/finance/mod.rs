//! Finance module - ad-hoc mosque income and expenses.

mod finance_model;

pub use finance_model::{Expense, MosqueIncome};
