//! User repository implementation for PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use quicksnip_core::error::StorageResult;
use quicksnip_core::models::{NewUser, PublicUser, User};
use quicksnip_core::ports::UserRepository;

use super::helpers::map_query_err;

// =============================================================================
// Repository Implementation
// =============================================================================

/// PostgreSQL implementation of UserRepository.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert_user(&self, user: &NewUser) -> StorageResult<PublicUser> {
        let row = sqlx::query_as::<_, PublicUserRow>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, avatar_url
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_query_err)?;

        Ok(row.into_public())
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, avatar_url
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_query_err)?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, avatar_url
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_query_err)?;

        Ok(row.map(UserRow::into_user))
    }

    async fn delete_by_username(&self, username: &str) -> StorageResult<Option<PublicUser>> {
        let row = sqlx::query_as::<_, PublicUserRow>(
            r#"
            DELETE FROM users
            WHERE username = $1
            RETURNING id, username, email, avatar_url
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_query_err)?;

        Ok(row.map(PublicUserRow::into_public))
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    avatar_url: Option<String>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            avatar_url: self.avatar_url,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PublicUserRow {
    id: i64,
    username: String,
    email: String,
    avatar_url: Option<String>,
}

impl PublicUserRow {
    fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username,
            email: self.email,
            avatar_url: self.avatar_url,
        }
    }
}
