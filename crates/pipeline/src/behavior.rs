//! Cross-cutting decorators around handler invocation.

use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use userhub_core::PipelineResult;

use crate::Request;

/// The rest of the chain, as a zero-argument continuation.
///
/// Calling it runs every inner behavior and finally the handler.
pub type Next<'a, T> = Box<dyn FnOnce() -> BoxFuture<'a, PipelineResult<T>> + Send + 'a>;

/// A decorator around the eventual handler invocation.
///
/// A behavior decides whether and when to invoke `next`. In normal operation it
/// invokes it exactly once; returning without invoking it short-circuits the
/// chain (validation does this on failure).
#[async_trait]
pub trait Behavior<R: Request>: Send + Sync {
    async fn handle<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
        next: Next<'a, R::Response>,
    ) -> PipelineResult<R::Response>;
}

/// Behaviors installed uniformly across request types.
///
/// The configured order is the chain order, outermost first. A stage is only
/// installed for request types matching its applicability predicate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Request span + outcome logging. Applies to every request type.
    Logging,
    /// Aggregate validation. Applies to request types with ≥1 validator.
    Validation,
}

impl PipelineStage {
    /// Default deployment order: logging wraps validation.
    pub const DEFAULT: [PipelineStage; 2] = [PipelineStage::Logging, PipelineStage::Validation];
}
