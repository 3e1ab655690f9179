use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use userhub_core::{PipelineError, PipelineResult};
use userhub_pipeline::{RequestHandler, guarded};

use crate::dto::UserDto;
use crate::requests::GetUserQuery;
use crate::store::UserStore;

pub struct GetUserHandler {
    store: Arc<dyn UserStore>,
}

impl GetUserHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler for GetUserHandler {
    type Request = GetUserQuery;

    async fn handle(&self, request: &GetUserQuery, cancel: &CancellationToken) -> PipelineResult<UserDto> {
        guarded(cancel, self.store.get_by_id(request.id, cancel))
            .await?
            .map(UserDto::from)
            .ok_or_else(|| PipelineError::not_found(format!("user {}", request.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::FakeStore;
    use userhub_core::UserId;

    #[tokio::test]
    async fn returns_stored_user() {
        let handler = GetUserHandler::new(FakeStore::with_users(3));
        let dto = handler
            .handle(&GetUserQuery { id: UserId::new(2) }, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(dto.user_id, UserId::new(2));
        assert_eq!(dto.given_names, "Given2");
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let handler = GetUserHandler::new(FakeStore::with_users(1));
        let err = handler
            .handle(&GetUserQuery { id: UserId::new(9) }, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }
}
