//! `UserStore` engines.
//!
//! - `InMemoryUserStore`: process-local, used by tests, benches and the default
//!   binary configuration
//! - `PostgresUserStore` (feature `postgres`): sqlx-backed, table `users`

mod in_memory;
#[cfg(feature = "postgres")]
mod postgres;

pub use in_memory::InMemoryUserStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresUserStore;
