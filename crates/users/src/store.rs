//! Persistence gateway port used by the handlers.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use userhub_core::{StoreError, UserId};

use crate::model::{NewUser, User};

/// Abstract CRUD surface over stored users.
///
/// Every operation receives the request's cancellation signal; implementations
/// should return `StoreError::Canceled` when it has fired. Concurrency control
/// is the implementation's own concern.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, id: UserId, cancel: &CancellationToken) -> Result<Option<User>, StoreError>;

    /// Users whose given names equal `given_names` or whose last name equals
    /// `last_name`, ignoring case (see [`User::matches_names`]).
    async fn find(
        &self,
        given_names: Option<&str>,
        last_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError>;

    /// Up to `size` users of 1-based page `page`, in ascending id order.
    async fn get_page(&self, page: u64, size: u64, cancel: &CancellationToken) -> Result<Vec<User>, StoreError>;

    async fn add(&self, user: NewUser, cancel: &CancellationToken) -> Result<User, StoreError>;

    /// Overwrite a stored user. `None` when no user has `user.id`.
    async fn update(&self, user: User, cancel: &CancellationToken) -> Result<Option<User>, StoreError>;

    /// Remove a user. `None` when no user had `id`.
    async fn delete(&self, id: UserId, cancel: &CancellationToken) -> Result<Option<User>, StoreError>;

    async fn count(&self, cancel: &CancellationToken) -> Result<u64, StoreError>;
}

#[async_trait]
impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    async fn get_by_id(&self, id: UserId, cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        (**self).get_by_id(id, cancel).await
    }

    async fn find(
        &self,
        given_names: Option<&str>,
        last_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError> {
        (**self).find(given_names, last_name, cancel).await
    }

    async fn get_page(&self, page: u64, size: u64, cancel: &CancellationToken) -> Result<Vec<User>, StoreError> {
        (**self).get_page(page, size, cancel).await
    }

    async fn add(&self, user: NewUser, cancel: &CancellationToken) -> Result<User, StoreError> {
        (**self).add(user, cancel).await
    }

    async fn update(&self, user: User, cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        (**self).update(user, cancel).await
    }

    async fn delete(&self, id: UserId, cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        (**self).delete(id, cancel).await
    }

    async fn count(&self, cancel: &CancellationToken) -> Result<u64, StoreError> {
        (**self).count(cancel).await
    }
}
