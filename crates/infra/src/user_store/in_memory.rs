use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use userhub_core::{StoreError, UserId};
use userhub_users::pagination::page_offset;
use userhub_users::{NewUser, User, UserStore};

/// In-memory user store for tests/dev.
///
/// Users are kept ordered by id, so paging is stable. Identifiers come from a
/// monotonically increasing sequence starting at 1 and are never reused, even
/// after a delete.
#[derive(Debug)]
pub struct InMemoryUserStore {
    inner: RwLock<BTreeMap<UserId, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Store pre-populated with `users`, assigned ids in iteration order.
    pub fn seeded(users: impl IntoIterator<Item = NewUser>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.inner.write() {
            for user in users {
                let user = user.with_id(store.allocate_id());
                map.insert(user.id, user);
            }
        }
        store
    }

    fn allocate_id(&self) -> UserId {
        UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn check(cancel: &CancellationToken) -> Result<(), StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Canceled);
        }
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<UserId, User>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::backend("user map lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<UserId, User>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::backend("user map lock poisoned"))
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_by_id(&self, id: UserId, cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        Self::check(cancel)?;
        if !id.is_assignable() {
            return Ok(None);
        }
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find(
        &self,
        given_names: Option<&str>,
        last_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError> {
        Self::check(cancel)?;
        let map = self.read()?;
        Ok(map
            .values()
            .filter(|u| u.matches_names(given_names, last_name))
            .cloned()
            .collect())
    }

    async fn get_page(&self, page: u64, size: u64, cancel: &CancellationToken) -> Result<Vec<User>, StoreError> {
        Self::check(cancel)?;
        let skip = usize::try_from(page_offset(page, size)).unwrap_or(usize::MAX);
        let take = usize::try_from(size).unwrap_or(usize::MAX);
        let map = self.read()?;
        Ok(map.values().skip(skip).take(take).cloned().collect())
    }

    async fn add(&self, user: NewUser, cancel: &CancellationToken) -> Result<User, StoreError> {
        Self::check(cancel)?;
        let mut map = self.write()?;
        let user = user.with_id(self.allocate_id());
        map.insert(user.id, user.clone());
        debug!(user_id = %user.id, "user stored");
        Ok(user)
    }

    async fn update(&self, user: User, cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        Self::check(cancel)?;
        let mut map = self.write()?;
        Ok(map.get_mut(&user.id).map(|slot| {
            *slot = user;
            slot.clone()
        }))
    }

    async fn delete(&self, id: UserId, cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        Self::check(cancel)?;
        Ok(self.write()?.remove(&id))
    }

    async fn count(&self, cancel: &CancellationToken) -> Result<u64, StoreError> {
        Self::check(cancel)?;
        Ok(self.read()?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userhub_users::ContactDetail;

    fn new_user(given: &str, last: &str) -> NewUser {
        NewUser {
            given_names: given.to_string(),
            last_name: last.to_string(),
            contact_detail: ContactDetail {
                email_address: format!("{}@example.com", given.to_lowercase()),
                mobile_number: "0400 000 000".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let store = InMemoryUserStore::new();
        let cancel = CancellationToken::new();

        let a = store.add(new_user("Ada", "Lovelace"), &cancel).await.unwrap();
        let b = store.add(new_user("Grace", "Hopper"), &cancel).await.unwrap();
        store.delete(b.id, &cancel).await.unwrap();
        let c = store.add(new_user("Edsger", "Dijkstra"), &cancel).await.unwrap();

        assert_eq!(a.id, UserId::new(1));
        assert_eq!(b.id, UserId::new(2));
        assert_eq!(c.id, UserId::new(3));
        assert_eq!(store.count(&cancel).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn pages_follow_id_order() {
        let store = InMemoryUserStore::seeded(
            ["A", "B", "C", "D", "E"].map(|n| new_user(n, "Test")),
        );
        let cancel = CancellationToken::new();

        let page: Vec<i64> = store
            .get_page(2, 2, &cancel)
            .await
            .unwrap()
            .iter()
            .map(|u| u.id.get())
            .collect();
        assert_eq!(page, vec![3, 4]);
        assert!(store.get_page(4, 2, &cancel).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_of_missing_user_returns_none() {
        let store = InMemoryUserStore::new();
        let cancel = CancellationToken::new();
        let ghost = new_user("Ghost", "User").with_id(UserId::new(42));

        assert_eq!(store.update(ghost, &cancel).await.unwrap(), None);
        assert_eq!(store.count(&cancel).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn cancelled_token_rejects_every_operation() {
        let store = InMemoryUserStore::seeded([new_user("Ada", "Lovelace")]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert_eq!(store.count(&cancel).await, Err(StoreError::Canceled));
        assert_eq!(
            store.add(new_user("Grace", "Hopper"), &cancel).await,
            Err(StoreError::Canceled)
        );
        assert_eq!(
            store.delete(UserId::new(1), &cancel).await,
            Err(StoreError::Canceled)
        );
        assert_eq!(store.read().unwrap().len(), 1);
    }
}
