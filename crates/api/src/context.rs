use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Per-request context installed by [`crate::middleware::request_context`].
///
/// The cancellation token is a child of the server's shutdown token and also
/// fires when the request future is dropped (client went away).
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    cancel: CancellationToken,
}

impl RequestContext {
    pub fn new(request_id: Uuid, cancel: CancellationToken) -> Self {
        Self { request_id, cancel }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn cancel(&self) -> &CancellationToken {
        &self.cancel
    }
}
