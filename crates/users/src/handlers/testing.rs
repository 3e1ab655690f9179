//! In-crate fake store for handler tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use userhub_core::{StoreError, UserId};

use crate::model::{ContactDetail, NewUser, User};
use crate::pagination::page_offset;
use crate::store::UserStore;

#[derive(Default)]
pub(crate) struct FakeStore {
    users: Mutex<BTreeMap<UserId, User>>,
    page_reads: AtomicUsize,
    writes: AtomicUsize,
}

impl FakeStore {
    /// `n` users with ids `1..=n`, named `Given{i} Last{i}`.
    pub(crate) fn with_users(n: i64) -> Arc<Self> {
        let store = Self::default();
        {
            let mut users = store.users.lock().unwrap();
            for i in 1..=n {
                let user = NewUser {
                    given_names: format!("Given{i}"),
                    last_name: format!("Last{i}"),
                    contact_detail: ContactDetail {
                        email_address: format!("user{i}@example.com"),
                        mobile_number: format!("0400 000 {i:03}"),
                    },
                }
                .with_id(UserId::new(i));
                users.insert(user.id, user);
            }
        }
        Arc::new(store)
    }

    pub(crate) fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub(crate) fn get(&self, id: UserId) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    pub(crate) fn page_reads(&self) -> usize {
        self.page_reads.load(Ordering::SeqCst)
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for FakeStore {
    async fn get_by_id(&self, id: UserId, _cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        Ok(self.get(id))
    }

    async fn find(
        &self,
        given_names: Option<&str>,
        last_name: Option<&str>,
        _cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .filter(|u| u.matches_names(given_names, last_name))
            .cloned()
            .collect())
    }

    async fn get_page(&self, page: u64, size: u64, _cancel: &CancellationToken) -> Result<Vec<User>, StoreError> {
        self.page_reads.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .skip(page_offset(page, size) as usize)
            .take(size as usize)
            .cloned()
            .collect())
    }

    async fn add(&self, user: NewUser, _cancel: &CancellationToken) -> Result<User, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        let next = users.keys().next_back().map_or(1, |id| id.get() + 1);
        let user = user.with_id(UserId::new(next));
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User, _cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        Ok(users
            .get_mut(&user.id)
            .map(|slot| {
                *slot = user;
                slot.clone()
            }))
    }

    async fn delete(&self, id: UserId, _cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().remove(&id))
    }

    async fn count(&self, _cancel: &CancellationToken) -> Result<u64, StoreError> {
        Ok(self.len() as u64)
    }
}
