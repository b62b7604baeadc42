//! Members module - the registry of pledging members.

mod members_model;

pub use members_model::Member;
