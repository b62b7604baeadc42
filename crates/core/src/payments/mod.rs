//! Payments module - member contributions, both general and imam-salary.

mod payments_model;

pub use payments_model::{ImamSalaryPayment, Payment};
