//! Shared DTOs (schemas-as-code) for the memberorder workspace.
//!
//! # Design constraints
//! - Syntax documents arrive from a host parser as JSON; nothing here parses source text.
//! - Every node is an immutable value: fixes build replacements instead of mutating.
//! - Be conservative with breaking changes. Prefer adding optional fields.

pub mod container;
pub mod document;
pub mod member;
pub mod report;
pub mod syntax;

/// Schema identifiers.
pub mod schema {
    pub const MEMBERORDER_DOCUMENT_V1: &str = "memberorder.document.v1";
    pub const MEMBERORDER_CHECK_V1: &str = "memberorder.check.v1";
    pub const MEMBERORDER_FIX_V1: &str = "memberorder.fix.v1";
}
