//! Masjid API Client - access to the external records API.
//!
//! [`MasjidApiClient`] implements the core's `LedgerSourceTrait`,
//! `RecycleBinServiceTrait` and `AuthServiceTrait`.

pub mod auth;
pub mod client;
pub mod code_delivery;
pub mod ledger;
pub mod recycle_bin;

pub use client::{MasjidApiClient, DEFAULT_API_URL};
pub use code_delivery::WebhookCodeDelivery;
