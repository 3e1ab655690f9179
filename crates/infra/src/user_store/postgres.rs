//! Postgres-backed user store.
//!
//! Uses a single `users` table keyed by a `BIGSERIAL` id. Paging is
//! `ORDER BY id LIMIT/OFFSET`; name search compares `lower()` on both sides.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use userhub_core::{StoreError, UserId};
use userhub_users::pagination::page_offset;
use userhub_users::{ContactDetail, NewUser, User, UserStore};

const USER_COLUMNS: &str = "id, given_names, last_name, email_address, mobile_number";

/// Postgres-backed user store.
///
/// ## Thread Safety
///
/// Holds a shared SQLx pool; every call checks out its own connection.
///
/// ## Cancellation
///
/// Each call refuses to start once the token has fired. In-flight queries are
/// abandoned by the caller's guard, which drops the query future.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: Arc<PgPool>,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    /// Connect to `database_url` and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await.map_err(backend)?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the `users` table when missing.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id            BIGSERIAL PRIMARY KEY,
                given_names   TEXT NOT NULL,
                last_name     TEXT NOT NULL,
                email_address TEXT NOT NULL,
                mobile_number TEXT NOT NULL
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(backend)?;
        debug!("users schema ensured");
        Ok(())
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::backend(e.to_string())
}

fn check(cancel: &CancellationToken) -> Result<(), StoreError> {
    if cancel.is_cancelled() {
        return Err(StoreError::Canceled);
    }
    Ok(())
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn user_from_row(row: &PgRow) -> Result<User, StoreError> {
    Ok(User {
        id: UserId::new(row.try_get("id").map_err(backend)?),
        given_names: row.try_get("given_names").map_err(backend)?,
        last_name: row.try_get("last_name").map_err(backend)?,
        contact_detail: ContactDetail {
            email_address: row.try_get("email_address").map_err(backend)?,
            mobile_number: row.try_get("mobile_number").map_err(backend)?,
        },
    })
}

fn users_from_rows(rows: Vec<PgRow>) -> Result<Vec<User>, StoreError> {
    rows.iter().map(user_from_row).collect()
}

#[async_trait]
impl UserStore for PostgresUserStore {
    #[instrument(skip(self, cancel), err)]
    async fn get_by_id(&self, id: UserId, cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        check(cancel)?;
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&*self.pool)
            .await
            .map_err(backend)?;
        row.as_ref().map(user_from_row).transpose()
    }

    #[instrument(skip(self, cancel), err)]
    async fn find(
        &self,
        given_names: Option<&str>,
        last_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError> {
        check(cancel)?;
        // NULL parameters compare as unknown, so an absent term matches nothing.
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE lower(given_names) = lower($1::text) OR lower(last_name) = lower($2::text) \
             ORDER BY id"
        ))
        .bind(given_names)
        .bind(last_name)
        .fetch_all(&*self.pool)
        .await
        .map_err(backend)?;
        users_from_rows(rows)
    }

    #[instrument(skip(self, cancel), err)]
    async fn get_page(&self, page: u64, size: u64, cancel: &CancellationToken) -> Result<Vec<User>, StoreError> {
        check(cancel)?;
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(to_i64(size))
        .bind(to_i64(page_offset(page, size)))
        .fetch_all(&*self.pool)
        .await
        .map_err(backend)?;
        users_from_rows(rows)
    }

    #[instrument(skip_all, err)]
    async fn add(&self, user: NewUser, cancel: &CancellationToken) -> Result<User, StoreError> {
        check(cancel)?;
        let row = sqlx::query(&format!(
            "INSERT INTO users (given_names, last_name, email_address, mobile_number) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.given_names)
        .bind(&user.last_name)
        .bind(&user.contact_detail.email_address)
        .bind(&user.contact_detail.mobile_number)
        .fetch_one(&*self.pool)
        .await
        .map_err(backend)?;
        user_from_row(&row)
    }

    #[instrument(skip_all, fields(user_id = %user.id), err)]
    async fn update(&self, user: User, cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        check(cancel)?;
        let row = sqlx::query(&format!(
            "UPDATE users SET given_names = $2, last_name = $3, email_address = $4, mobile_number = $5 \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id.get())
        .bind(&user.given_names)
        .bind(&user.last_name)
        .bind(&user.contact_detail.email_address)
        .bind(&user.contact_detail.mobile_number)
        .fetch_optional(&*self.pool)
        .await
        .map_err(backend)?;
        row.as_ref().map(user_from_row).transpose()
    }

    #[instrument(skip(self, cancel), err)]
    async fn delete(&self, id: UserId, cancel: &CancellationToken) -> Result<Option<User>, StoreError> {
        check(cancel)?;
        let row = sqlx::query(&format!("DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}"))
            .bind(id.get())
            .fetch_optional(&*self.pool)
            .await
            .map_err(backend)?;
        row.as_ref().map(user_from_row).transpose()
    }

    #[instrument(skip_all, err)]
    async fn count(&self, cancel: &CancellationToken) -> Result<u64, StoreError> {
        check(cancel)?;
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&*self.pool)
            .await
            .map_err(backend)?;
        Ok(u64::try_from(n).unwrap_or(0))
    }
}
