//! Assembly error taxonomy.
//!
//! Propagation is fail-fast and atomic: any failure aborts the whole
//! `generate` call and no partial specification is returned. Generation is
//! pure given its inputs, so there is no retry policy.

use thiserror::Error;

/// Errors produced while assembling a specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// No scenario with this id exists in the configuration.
    #[error("scenario not found: '{id}'")]
    ScenarioNotFound { id: String },

    /// A scenario names a builder that was never registered.
    #[error("builder not registered: '{name}'")]
    BuilderNotRegistered { name: String },
}
