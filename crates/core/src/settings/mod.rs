//! Settings module - ledger configuration injected at startup.

mod settings_model;

pub use settings_model::{LedgerSettings, LedgerSettingsUpdate};
