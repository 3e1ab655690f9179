use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use userhub_core::PipelineResult;
use userhub_pipeline::{RequestHandler, guarded};

use crate::dto::{PaginatedDto, UserDto};
use crate::requests::ListUsersQuery;
use crate::store::UserStore;

/// Paginated listing with look-ahead.
///
/// Fetches the requested page and the one after it concurrently; the second
/// fetch only decides `has_next_page`. The two reads are not a snapshot, so a
/// concurrent write may make the flag stale.
pub struct ListUsersHandler {
    store: Arc<dyn UserStore>,
}

impl ListUsersHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler for ListUsersHandler {
    type Request = ListUsersQuery;

    async fn handle(
        &self,
        request: &ListUsersQuery,
        cancel: &CancellationToken,
    ) -> PipelineResult<PaginatedDto<UserDto>> {
        let page = request.page_number.max(1) as u64;
        let size = request.items_per_page.max(1) as u64;

        let (current, following) = tokio::try_join!(
            guarded(cancel, self.store.get_page(page, size, cancel)),
            guarded(cancel, self.store.get_page(page.saturating_add(1), size, cancel)),
        )?;

        Ok(PaginatedDto {
            data: current.into_iter().map(UserDto::from).collect(),
            has_next_page: !following.is_empty(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::FakeStore;
    use userhub_core::PipelineError;

    async fn list(store: Arc<FakeStore>, page: i64, size: i64) -> PaginatedDto<UserDto> {
        ListUsersHandler::new(store)
            .handle(&ListUsersQuery::new(page, size), &CancellationToken::new())
            .await
            .unwrap()
    }

    fn ids(page: &PaginatedDto<UserDto>) -> Vec<i64> {
        page.data.iter().map(|u| u.user_id.get()).collect()
    }

    #[tokio::test]
    async fn look_ahead_sets_has_next_page() {
        let store = FakeStore::with_users(3);

        let first = list(store.clone(), 1, 2).await;
        assert_eq!(ids(&first), vec![1, 2]);
        assert!(first.has_next_page);

        let second = list(store.clone(), 2, 2).await;
        assert_eq!(ids(&second), vec![3]);
        assert!(!second.has_next_page);

        let past_end = list(store.clone(), 3, 2).await;
        assert!(past_end.data.is_empty());
        assert!(!past_end.has_next_page);

        assert_eq!(store.page_reads(), 6);
    }

    #[tokio::test]
    async fn exact_fit_has_no_next_page() {
        let page = list(FakeStore::with_users(4), 2, 2).await;
        assert_eq!(ids(&page), vec![3, 4]);
        assert!(!page.has_next_page);
    }

    #[tokio::test]
    async fn cancelled_listing_reports_canceled_without_reading() {
        let store = FakeStore::with_users(3);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = ListUsersHandler::new(store.clone())
            .handle(&ListUsersQuery::new(1, 2), &cancel)
            .await
            .unwrap_err();

        assert_eq!(err, PipelineError::Canceled);
        assert_eq!(store.page_reads(), 0);
    }
}
