use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use userhub_core::{PipelineError, PipelineResult};
use userhub_pipeline::{RequestHandler, guarded};

use crate::dto::UserDto;
use crate::requests::UpdateUserCommand;
use crate::store::UserStore;

/// Overwrites an existing user. Updating a missing id is `NotFound`.
pub struct UpdateUserHandler {
    store: Arc<dyn UserStore>,
}

impl UpdateUserHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler for UpdateUserHandler {
    type Request = UpdateUserCommand;

    async fn handle(&self, request: &UpdateUserCommand, cancel: &CancellationToken) -> PipelineResult<UserDto> {
        let missing = || PipelineError::not_found(format!("user {}", request.id));

        let mut user = guarded(cancel, self.store.get_by_id(request.id, cancel))
            .await?
            .ok_or_else(missing)?;
        user.apply_changes(request.changes());

        // The row can vanish between the read and the write.
        let saved = guarded(cancel, self.store.update(user, cancel))
            .await?
            .ok_or_else(missing)?;

        info!(user_id = %saved.id, "user updated");
        Ok(UserDto::from(saved))
    }
}
