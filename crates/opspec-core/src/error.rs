//! Core error types for opspec-core.
//!
//! Uses `thiserror` for structured, matchable error variants. These cover
//! the placement lint on contract blocks; assembly errors live in
//! `opspec-assemble`.

use thiserror::Error;

/// Placement violations detected on a contract block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// A post-state projection appeared in a precondition.
    #[error("post-state reference in precondition of call '{call}'")]
    PostStateInPrecondition { call: String },

    /// A `_result` reference appeared in a precondition.
    #[error("result reference in precondition of call '{call}'")]
    ResultInPrecondition { call: String },

    /// A post-state or `_result` reference appeared in call arguments.
    #[error("post-state or result reference in arguments of call '{call}'")]
    PostStateInCallArgs { call: String },
}
