use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use userhub_core::PipelineResult;
use userhub_pipeline::{RequestHandler, guarded};

use crate::dto::DeleteOutcome;
use crate::requests::DeleteUserCommand;
use crate::store::UserStore;

/// Idempotent delete: removing an absent id still succeeds.
pub struct DeleteUserHandler {
    store: Arc<dyn UserStore>,
}

impl DeleteUserHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler for DeleteUserHandler {
    type Request = DeleteUserCommand;

    async fn handle(&self, request: &DeleteUserCommand, cancel: &CancellationToken) -> PipelineResult<DeleteOutcome> {
        let removed = guarded(cancel, self.store.delete(request.id, cancel)).await?;
        match &removed {
            Some(user) => info!(user_id = %user.id, "user deleted"),
            None => debug!(user_id = %request.id, "delete of absent user ignored"),
        }
        Ok(DeleteOutcome {
            removed: removed.is_some(),
        })
    }
}
