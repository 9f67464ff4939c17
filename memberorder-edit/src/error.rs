//! Error types for memberorder-edit.
//!
//! Policy blocks (exit code 2) are kept apart from runtime failures (exit code 1) so the CLI can
//! tell "the tree changed under us" from "something broke".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// Refused to write (exit code 2).
    #[error("policy block: {0}")]
    PolicyBlock(#[from] PolicyBlockError),

    /// I/O or other tool failure (exit code 1).
    #[error("runtime error: {0}")]
    Runtime(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum PolicyBlockError {
    /// A source file no longer hashes to what the plan was computed from.
    #[error("precondition mismatch: {message}")]
    PreconditionMismatch { message: String },
}

impl EditError {
    pub fn is_policy_block(&self) -> bool {
        matches!(self, EditError::PolicyBlock(_))
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            EditError::PolicyBlock(_) => 2,
            EditError::Runtime(_) => 1,
        }
    }
}

pub type EditResult<T> = Result<T, EditError>;
