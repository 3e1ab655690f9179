use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use userhub_core::StoreError;
use userhub_infra::InMemoryUserStore;
use userhub_infra::seed::demo_users;
use userhub_pipeline::Dispatcher;
use userhub_users::{NewUser, UserStore};

use crate::config::{ApiConfig, StoreBackend};

/// Everything the route handlers need.
pub struct AppServices {
    pub dispatcher: Dispatcher,
    /// Parent of every request's cancellation token.
    pub shutdown: CancellationToken,
}

impl AppServices {
    pub fn new(store: Arc<dyn UserStore>, shutdown: CancellationToken) -> Self {
        Self {
            dispatcher: userhub_users::dispatcher(store),
            shutdown,
        }
    }

    /// In-memory store pre-populated with `users` (dev/test).
    pub fn in_memory(users: impl IntoIterator<Item = NewUser>, shutdown: CancellationToken) -> Self {
        Self::new(Arc::new(InMemoryUserStore::seeded(users)), shutdown)
    }
}

/// Select and initialise the store named by `config`.
pub async fn build_services(config: &ApiConfig, shutdown: CancellationToken) -> Result<AppServices, StoreError> {
    match &config.store {
        StoreBackend::Memory => {
            let users = if config.seed_demo_data { demo_users() } else { Vec::new() };
            info!(store = "memory", seeded = users.len(), "user store ready");
            Ok(AppServices::in_memory(users, shutdown))
        }
        StoreBackend::Postgres { database_url } => postgres_services(database_url, shutdown).await,
    }
}

#[cfg(feature = "postgres")]
async fn postgres_services(database_url: &str, shutdown: CancellationToken) -> Result<AppServices, StoreError> {
    let store = userhub_infra::PostgresUserStore::connect(database_url).await?;
    info!(store = "postgres", "user store ready");
    Ok(AppServices::new(Arc::new(store), shutdown))
}

#[cfg(not(feature = "postgres"))]
async fn postgres_services(_database_url: &str, _shutdown: CancellationToken) -> Result<AppServices, StoreError> {
    Err(StoreError::backend("built without the `postgres` feature"))
}
