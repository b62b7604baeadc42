//! Dashboard module - cached ledger projections over a record source.

mod dashboard_model;
mod dashboard_service;
mod dashboard_traits;
mod projection_cache;

pub use dashboard_model::*;
pub use dashboard_service::{project_ledger, DashboardService};
pub use dashboard_traits::*;
pub use projection_cache::ProjectionCache;
