//! PostgreSQL-backed bearer token storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use fleetdesk_application::{AccessTokenRecord, AccessTokenRepository};
use fleetdesk_core::{AppError, AppResult, UserId};


/// PostgreSQL implementation of the access token repository port.
#[derive(Clone)]
pub struct PostgresAccessTokenRepository {
    pool: PgPool,
}

impl PostgresAccessTokenRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccessTokenRow {
    id: Uuid,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
}

impl From<AccessTokenRow> for AccessTokenRecord {
    fn from(row: AccessTokenRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            expires_at: row.expires_at,
            last_used_at: row.last_used_at,
        }
    }
}

#[async_trait]
impl AccessTokenRepository for PostgresAccessTokenRepository {
    async fn create_token(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO access_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to store access token: {error}")))
    }

    async fn find_active_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AccessTokenRecord>> {
        let row = sqlx::query_as::<_, AccessTokenRow>(
            r#"
            SELECT id, user_id, expires_at, last_used_at
            FROM access_tokens
            WHERE token_hash = $1
                AND revoked_at IS NULL
                AND expires_at > $2
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to resolve access token: {error}")))?;

        Ok(row.map(AccessTokenRecord::from))
    }

    async fn touch_token(&self, token_id: Uuid, used_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE access_tokens SET last_used_at = $2 WHERE id = $1")
            .bind(token_id)
            .bind(used_at)
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to record access token use: {error}"))
            })?;

        Ok(())
    }

    async fn revoke_token(&self, token_hash: &str, revoked_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE access_tokens
            SET revoked_at = $2
            WHERE token_hash = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token_hash)
        .bind(revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to revoke access token: {error}")))?;

        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: UserId, revoked_at: DateTime<Utc>) -> AppResult<u64> {
        let revoked = sqlx::query(
            r#"
            UPDATE access_tokens
            SET revoked_at = $2
            WHERE user_id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to revoke access tokens for user: {error}"))
        })?
        .rows_affected();

        tracing::debug!(user_id = %user_id, revoked, "revoked access tokens");
        Ok(revoked)
    }
}
