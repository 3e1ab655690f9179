use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use userhub_core::PipelineResult;
use userhub_pipeline::{RequestHandler, guarded};

use crate::dto::UserDto;
use crate::requests::FindUsersQuery;
use crate::store::UserStore;

/// Name search. Read-only; an empty result is a success.
pub struct FindUsersHandler {
    store: Arc<dyn UserStore>,
}

impl FindUsersHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler for FindUsersHandler {
    type Request = FindUsersQuery;

    async fn handle(&self, request: &FindUsersQuery, cancel: &CancellationToken) -> PipelineResult<Vec<UserDto>> {
        let users = guarded(
            cancel,
            self.store.find(
                request.given_names.as_deref(),
                request.last_name.as_deref(),
                cancel,
            ),
        )
        .await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}
