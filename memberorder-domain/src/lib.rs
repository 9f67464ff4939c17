//! Domain logic: decide *whether* a container's members are in canonical order.
//!
//! This crate owns classification, exemption and detection. It does not own *how* a container
//! is rewritten; that's the `memberorder-edit` crate.

pub mod classify;
mod detect;
mod policy;
mod ports;

pub use classify::{Group, MemberCategory, SortKey, identifier, sort_key, target_order};
pub use detect::{Analysis, Analyzer, Violation, first_violation};
pub use policy::{DEFAULT_IGNORED_NAMESPACE, DEFAULT_IGNORED_TYPE, Exemption, ExemptionPolicy};
pub use ports::{EmbeddedFacts, FactProvider};
