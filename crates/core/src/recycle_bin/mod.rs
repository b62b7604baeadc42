//! Recycle bin module - soft-deleted records awaiting restore or purge.

mod recycle_bin_model;
mod recycle_bin_traits;

pub use recycle_bin_model::*;
pub use recycle_bin_traits::*;
