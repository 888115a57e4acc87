//! # User Repository
//!
//! SQLite storage for borrowers. Users are looked up by name, first match
//! in insertion order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{UserFilter, UserStore};
use stockroom_core::User;

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    name: String,
    age: i64,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> DbResult<User> {
        let age = u32::try_from(self.age)
            .map_err(|_| DbError::corrupt("User", self.id.as_str(), "age out of range"))?;

        Ok(User {
            id: self.id,
            name: self.name,
            age,
            created_at: self.created_at,
        })
    }
}

/// SQLite-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, user: &User) -> DbResult<User> {
        debug!(id = %user.id, name = %user.name, "Inserting user");

        sqlx::query("INSERT INTO users (id, name, age, created_at) VALUES (?1, ?2, ?3, ?4)")
            .bind(&user.id)
            .bind(&user.name)
            .bind(i64::from(user.age))
            .bind(user.created_at)
            .execute(&self.pool)
            .await?;

        Ok(user.clone())
    }

    async fn find_one(&self, filter: &UserFilter) -> DbResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, age, created_at
            FROM users
            WHERE (?1 IS NULL OR name = ?1)
            ORDER BY rowid
            LIMIT 1
            "#,
        )
        .bind(filter.name.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_all(&self, filter: &UserFilter) -> DbResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, age, created_at
            FROM users
            WHERE (?1 IS NULL OR name = ?1)
            ORDER BY rowid
            "#,
        )
        .bind(filter.name.as_deref())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}
