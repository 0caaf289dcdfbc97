/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - UserStore trait を通して handler / middleware に注入する
 * - DB エラーは RepoError に変換して返す
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    #[sqlx(rename = "firstName")]
    pub first_name: String,
    #[sqlx(rename = "lastName")]
    pub last_name: String,
    #[sqlx(rename = "emailAddress")]
    pub email_address: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_hash: String,
}

/// Data-store interface for user records.
///
/// Lookup is by the email exactly as supplied (case-sensitive); the unique
/// index on "emailAddress" makes the email an authentication identifier.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email_address: &str) -> Result<Option<UserRow>, RepoError>;
    async fn create(&self, user: NewUser) -> Result<UserRow, RepoError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email_address: &str) -> Result<Option<UserRow>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", "firstName", "lastName", "emailAddress", "password", "createdAt"
            FROM users
            WHERE "emailAddress" = $1
            "#,
        )
        .bind(email_address)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn create(&self, user: NewUser) -> Result<UserRow, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users ("firstName", "lastName", "emailAddress", "password")
            VALUES ($1, $2, $3, $4)
            RETURNING "userId", "firstName", "lastName", "emailAddress", "password", "createdAt"
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email_address)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }
}
