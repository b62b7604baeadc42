//! Auth module - roles, view gating, the external auth service interface and
//! one-time codes.

mod auth_model;
mod auth_traits;
mod one_time_code;

pub use auth_model::*;
pub use auth_traits::*;
pub use one_time_code::{CodeDeliveryTrait, OneTimeCodeConfig, OneTimeCodeService};
