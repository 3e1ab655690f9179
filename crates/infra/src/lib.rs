//! Infrastructure layer: `UserStore` engines and demo data.

pub mod seed;
pub mod user_store;

pub use user_store::InMemoryUserStore;
#[cfg(feature = "postgres")]
pub use user_store::PostgresUserStore;
