use thiserror::Error;

/// Errors the engine can surface to an embedder.
///
/// Only two variants are ever returned as `Err` from the public API: everything
/// else in the conceptual error space (infeasibility, timeout) is a normal
/// business outcome modeled as a `SolveOutcome` variant, not a failure — see
/// `scheduling_core::SolveOutcome`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid input range: {0}")]
    InvalidRange(String),

    #[error("internal solver error: {0}")]
    Internal(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
