//! Imams module - salaried imams and the payouts made to them.

mod imams_model;

pub use imams_model::{Imam, ImamPayout};
