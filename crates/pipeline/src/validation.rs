//! Aggregate validation as a pipeline behavior.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use userhub_core::{PipelineError, PipelineResult, ValidationFailure};

use crate::{Behavior, Next, Request};

/// Inspects a request and reports zero or more named failures.
///
/// Validators are pure: no IO, no side effects, no ordering dependency on one
/// another. They may run concurrently.
#[async_trait]
pub trait Validator: Send + Sync {
    type Request: Request;

    async fn validate(&self, request: &Self::Request) -> Vec<ValidationFailure>;
}

/// Runs every validator registered for `R` before the rest of the chain.
///
/// - no validators: pass-through;
/// - otherwise all validators run concurrently and their failures are
///   concatenated in registration order (not completion order); blank
///   failures are dropped;
/// - any failure: `ValidationFailed(all failures)` and `next` is never called;
/// - no failure: `next` is called and its result returned unchanged.
pub struct ValidationBehavior<R: Request> {
    validators: Vec<Arc<dyn Validator<Request = R>>>,
}

impl<R: Request> ValidationBehavior<R> {
    pub fn new(validators: Vec<Arc<dyn Validator<Request = R>>>) -> Self {
        Self { validators }
    }

    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Run all validators once and merge their failures deterministically.
    pub async fn collect_failures(&self, request: &R) -> Vec<ValidationFailure> {
        let results = join_all(self.validators.iter().map(|v| v.validate(request))).await;
        results
            .into_iter()
            .flatten()
            .filter(|failure| !failure.is_blank())
            .collect()
    }
}

impl<R: Request> core::fmt::Debug for ValidationBehavior<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValidationBehavior")
            .field("request", &R::name())
            .field("validators", &self.validators.len())
            .finish()
    }
}

#[async_trait]
impl<R: Request> Behavior<R> for ValidationBehavior<R> {
    async fn handle<'a>(
        &'a self,
        request: &'a R,
        _cancel: &'a CancellationToken,
        next: Next<'a, R::Response>,
    ) -> PipelineResult<R::Response> {
        if self.validators.is_empty() {
            return next().await;
        }

        let failures = self.collect_failures(request).await;
        if !failures.is_empty() {
            return Err(PipelineError::ValidationFailed(failures));
        }

        next().await
    }
}
