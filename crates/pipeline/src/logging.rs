//! Request span + outcome logging behavior.

use std::time::Instant;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};

use userhub_core::{PipelineError, PipelineResult};

use crate::{Behavior, Next, Request};

/// Wraps the rest of the chain in a `request` span and logs the outcome.
///
/// Never alters the result.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingBehavior;

#[async_trait]
impl<R: Request> Behavior<R> for LoggingBehavior {
    async fn handle<'a>(
        &'a self,
        _request: &'a R,
        _cancel: &'a CancellationToken,
        next: Next<'a, R::Response>,
    ) -> PipelineResult<R::Response> {
        let request = R::name();
        let span = tracing::info_span!("request", request);
        let started = Instant::now();

        let result = next().instrument(span).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => debug!(request, elapsed_ms, "request handled"),
            Err(PipelineError::ValidationFailed(failures)) => {
                info!(request, elapsed_ms, failures = failures.len(), "request rejected by validation")
            }
            Err(PipelineError::NotFound(what)) => {
                debug!(request, elapsed_ms, what = %what, "request target not found")
            }
            Err(PipelineError::Canceled) => info!(request, elapsed_ms, "request canceled"),
            Err(e) => warn!(request, elapsed_ms, error = %e, "request failed"),
        }

        result
    }
}
