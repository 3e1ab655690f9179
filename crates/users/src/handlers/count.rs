use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use userhub_core::PipelineResult;
use userhub_pipeline::{RequestHandler, guarded};

use crate::requests::CountUsersQuery;
use crate::store::UserStore;

pub struct CountUsersHandler {
    store: Arc<dyn UserStore>,
}

impl CountUsersHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler for CountUsersHandler {
    type Request = CountUsersQuery;

    async fn handle(&self, _request: &CountUsersQuery, cancel: &CancellationToken) -> PipelineResult<u64> {
        guarded(cancel, self.store.count(cancel)).await
    }
}
