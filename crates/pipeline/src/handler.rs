use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use userhub_core::PipelineResult;

use crate::Request;

/// Executes the effect of one request type (request handler abstraction).
///
/// Handlers receive requests that already went through every behavior of the
/// chain (in particular, validation). They may call the persistence gateway and
/// must observe `cancel` at each such call (see [`crate::guarded`]).
///
/// A request type must have exactly one handler registered; the dispatcher
/// reports `HandlerNotFound` / `AmbiguousHandler` otherwise.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    type Request: Request;

    async fn handle(
        &self,
        request: &Self::Request,
        cancel: &CancellationToken,
    ) -> PipelineResult<<Self::Request as Request>::Response>;
}
