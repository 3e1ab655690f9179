use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use userhub_core::PipelineResult;
use userhub_pipeline::{RequestHandler, guarded};

use crate::dto::UserDto;
use crate::requests::CreateUserCommand;
use crate::store::UserStore;

pub struct CreateUserHandler {
    store: Arc<dyn UserStore>,
}

impl CreateUserHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler for CreateUserHandler {
    type Request = CreateUserCommand;

    async fn handle(&self, request: &CreateUserCommand, cancel: &CancellationToken) -> PipelineResult<UserDto> {
        let user = guarded(cancel, self.store.add(request.to_new_user(), cancel)).await?;
        info!(user_id = %user.id, "user created");
        Ok(UserDto::from(user))
    }
}
