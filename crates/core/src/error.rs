//! Error model shared by the request pipeline, the handlers and the stores.

use thiserror::Error;

use crate::validation::ValidationFailure;

/// Result type used across the request pipeline.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Persistence gateway error.
///
/// These are **infrastructure errors**; the pipeline surfaces them unchanged
/// (no retry, no compensation).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The storage backend failed (connection, query, lock poisoning...).
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// The caller's cancellation signal fired before the operation finished.
    #[error("operation canceled")]
    Canceled,
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Outcome of a failed `send` through the dispatcher.
///
/// ## Error Categories
///
/// - **ValidationFailed**: one or more validators rejected the request; carries
///   every failure, not just the first. The handler never ran.
/// - **NotFound**: the handler looked for an entity that does not exist.
/// - **HandlerNotFound / AmbiguousHandler**: registration defects. Not
///   recoverable for that request.
/// - **Persistence**: the gateway failed.
/// - **Canceled**: the request's cancellation signal fired.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("validation failed with {} failure(s)", .0.len())]
    ValidationFailed(Vec<ValidationFailure>),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("no handler registered for request type `{0}`")]
    HandlerNotFound(&'static str),

    #[error("{count} handlers registered for request type `{request}`")]
    AmbiguousHandler { request: &'static str, count: usize },

    #[error("persistence failure: {0}")]
    Persistence(StoreError),

    #[error("request canceled")]
    Canceled,
}

impl PipelineError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Failures carried by a `ValidationFailed` error (empty otherwise).
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            Self::ValidationFailed(failures) => failures,
            _ => &[],
        }
    }

    /// Registration/configuration defects, as opposed to per-request outcomes.
    pub fn is_configuration_defect(&self) -> bool {
        matches!(self, Self::HandlerNotFound(_) | Self::AmbiguousHandler { .. })
    }
}

impl From<StoreError> for PipelineError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Canceled => PipelineError::Canceled,
            other => PipelineError::Persistence(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_cancellation_maps_to_pipeline_cancellation() {
        assert_eq!(PipelineError::from(StoreError::Canceled), PipelineError::Canceled);
    }

    #[test]
    fn store_backend_failure_maps_to_persistence() {
        let err = PipelineError::from(StoreError::backend("disk on fire"));
        assert_eq!(
            err,
            PipelineError::Persistence(StoreError::Backend("disk on fire".to_string()))
        );
        assert!(!err.is_configuration_defect());
    }

    #[test]
    fn validation_error_exposes_all_failures() {
        let err = PipelineError::ValidationFailed(vec![
            ValidationFailure::new("givenNames", "must not be empty"),
            ValidationFailure::new("lastName", "must not be empty"),
        ]);
        assert_eq!(err.failures().len(), 2);
        assert_eq!(err.to_string(), "validation failed with 2 failure(s)");
    }

    #[test]
    fn dispatch_defects_are_flagged() {
        assert!(PipelineError::HandlerNotFound("X").is_configuration_defect());
        assert!(
            PipelineError::AmbiguousHandler {
                request: "X",
                count: 2
            }
            .is_configuration_defect()
        );
    }
}
