//! `userhub-users`: the user-management use cases.
//!
//! - `model`: the stored `User` entity
//! - `requests`: one typed request per operation (queries + commands)
//! - `validators`: rule sets run by the validation behavior
//! - `handlers`: one handler per request type
//! - `store`: the persistence gateway port the handlers depend on
//! - `dto`: projections returned to callers
//!
//! `register` wires all of it into a [`userhub_pipeline::DispatcherBuilder`].

pub mod dto;
pub mod handlers;
pub mod model;
pub mod pagination;
pub mod requests;
pub mod store;
pub mod validators;

use std::sync::Arc;

use userhub_pipeline::{Dispatcher, DispatcherBuilder};

pub use dto::{DeleteOutcome, PaginatedDto, UserDto};
pub use model::{ContactDetail, NewUser, User};
pub use requests::{
    CountUsersQuery, CreateUserCommand, DeleteUserCommand, FindUsersQuery, GetUserQuery,
    ListUsersQuery, UpdateUserCommand,
};
pub use store::UserStore;

/// Register every user handler and validator on `builder`.
pub fn register(builder: DispatcherBuilder, store: Arc<dyn UserStore>) -> DispatcherBuilder {
    builder
        .handler(handlers::CreateUserHandler::new(store.clone()))
        .validator(validators::CreateUserValidator)
        .handler(handlers::GetUserHandler::new(store.clone()))
        .validator(validators::GetUserValidator)
        .handler(handlers::FindUsersHandler::new(store.clone()))
        .handler(handlers::ListUsersHandler::new(store.clone()))
        .validator(validators::ListUsersValidator)
        .handler(handlers::UpdateUserHandler::new(store.clone()))
        .validator(validators::UpdateUserValidator)
        .handler(handlers::DeleteUserHandler::new(store.clone()))
        .validator(validators::DeleteUserValidator)
        .handler(handlers::CountUsersHandler::new(store))
}

/// Dispatcher with the default stages and every user operation registered.
pub fn dispatcher(store: Arc<dyn UserStore>) -> Dispatcher {
    register(Dispatcher::builder(), store).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::FakeStore;
    use userhub_core::{PipelineError, UserId};
    use userhub_pipeline::CancellationToken;

    #[tokio::test]
    async fn every_operation_has_exactly_one_route() {
        let dispatcher = dispatcher(FakeStore::with_users(0));
        assert!(dispatcher.handles::<CreateUserCommand>());
        assert!(dispatcher.handles::<GetUserQuery>());
        assert!(dispatcher.handles::<FindUsersQuery>());
        assert!(dispatcher.handles::<ListUsersQuery>());
        assert!(dispatcher.handles::<UpdateUserCommand>());
        assert!(dispatcher.handles::<DeleteUserCommand>());
        assert!(dispatcher.handles::<CountUsersQuery>());
        // Find and count carry no validators, so only logging wraps them.
        assert_eq!(dispatcher.chain_len::<FindUsersQuery>(), 1);
        assert_eq!(dispatcher.chain_len::<GetUserQuery>(), 2);
    }

    #[tokio::test]
    async fn invalid_update_never_reaches_the_store() {
        let store = FakeStore::with_users(1);
        let dispatcher = dispatcher(store.clone());
        let cmd = UpdateUserCommand {
            id: UserId::new(1),
            given_names: String::new(),
            last_name: "Lovelace".into(),
            email_address: "ada@example.com".into(),
            mobile_number: "0400 111 222".into(),
        };

        let err = dispatcher
            .send(cmd, &CancellationToken::new())
            .await
            .unwrap_err();

        let fields: Vec<_> = err.failures().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["givenNames"]);
        assert_eq!(store.writes(), 0);
        assert_eq!(store.get(UserId::new(1)).unwrap().given_names, "Given1");
    }

    #[tokio::test]
    async fn delete_through_dispatcher_is_idempotent() {
        let store = FakeStore::with_users(2);
        let dispatcher = dispatcher(store.clone());
        let cancel = CancellationToken::new();

        let first = dispatcher
            .send(DeleteUserCommand { id: UserId::new(2) }, &cancel)
            .await
            .unwrap();
        let second = dispatcher
            .send(DeleteUserCommand { id: UserId::new(2) }, &cancel)
            .await
            .unwrap();

        assert_eq!(first, DeleteOutcome { removed: true });
        assert_eq!(second, DeleteOutcome { removed: false });
        assert_eq!(store.len(), 1);
        assert!(store.get(UserId::new(2)).is_none());
    }

    #[tokio::test]
    async fn large_page_size_returns_every_user() {
        let dispatcher = dispatcher(FakeStore::with_users(3));

        let page = dispatcher
            .send(ListUsersQuery::new(1, 500), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(page.data.len(), 3);
        assert!(!page.has_next_page);
    }

    #[tokio::test]
    async fn cancelled_request_surfaces_canceled() {
        let store = FakeStore::with_users(1);
        let dispatcher = dispatcher(store.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = dispatcher
            .send(DeleteUserCommand { id: UserId::new(1) }, &cancel)
            .await
            .unwrap_err();

        assert_eq!(err, PipelineError::Canceled);
        assert_eq!(store.len(), 1);
    }
}
