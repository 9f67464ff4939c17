//! Embeddable core library for memberorder.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking into an editor host or
//! any other process that already has parsed documents.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`DocumentSource`](ports::DocumentSource): load parsed documents
//! - [`WritePort`](ports::WritePort): write report artifacts
//!
//! The [`adapters`] module provides default filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`run_check`](pipeline::run_check): analyze every container, report violations
//! - [`run_fix`](pipeline::run_fix): plan fixes, render a patch, optionally write it

pub mod adapters;
pub mod cancel;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use cancel::CancellationFlag;

// Re-export so embedders don't need memberorder-domain directly.
pub use memberorder_domain::{Analyzer, ExemptionPolicy, FactProvider};
