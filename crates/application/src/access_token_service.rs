//! Bearer access tokens.
//!
//! Tokens are 32 random bytes, hex encoded, returned to the client once and
//! persisted only as SHA-256 hashes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use fleetdesk_core::{AppError, AppResult, UserId};
use uuid::Uuid;

mod token_crypto;


pub use token_crypto::hash_token;

/// Access token row as persisted in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenRecord {
    /// Token identifier.
    pub id: Uuid,
    /// Owner of the token.
    pub user_id: UserId,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
    /// Last request that presented the token.
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Repository port for access token persistence.
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    /// Stores a new token hash.
    async fn create_token(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Uuid>;

    /// Finds a token that is neither revoked nor expired at `now`.
    async fn find_active_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AccessTokenRecord>>;

    /// Records that the token was just presented.
    async fn touch_token(&self, token_id: Uuid, used_at: DateTime<Utc>) -> AppResult<()>;

    /// Revokes one token by hash. Revoking an unknown token is a no-op.
    async fn revoke_token(&self, token_hash: &str, revoked_at: DateTime<Utc>) -> AppResult<()>;

    /// Revokes every active token of a user, returning how many were revoked.
    async fn revoke_all_for_user(&self, user_id: UserId, revoked_at: DateTime<Utc>) -> AppResult<u64>;
}

/// Freshly issued token. The raw value is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedAccessToken {
    /// Raw bearer token to hand to the client.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Application service issuing and validating bearer tokens.
#[derive(Clone)]
pub struct AccessTokenService {
    repository: Arc<dyn AccessTokenRepository>,
    time_to_live: Duration,
}

impl AccessTokenService {
    /// Creates a token service issuing tokens valid for `time_to_live`.
    #[must_use]
    pub fn new(repository: Arc<dyn AccessTokenRepository>, time_to_live: Duration) -> Self {
        Self {
            repository,
            time_to_live,
        }
    }

    /// Issues a new token for `user_id`.
    pub async fn issue(&self, user_id: UserId) -> AppResult<IssuedAccessToken> {
        let (token, token_hash) = token_crypto::generate_token()?;
        let expires_at = Utc::now() + self.time_to_live;

        self.repository
            .create_token(user_id, token_hash.as_str(), expires_at)
            .await?;

        Ok(IssuedAccessToken { token, expires_at })
    }

    /// Resolves a raw token to its active record.
    pub async fn resolve(&self, raw_token: &str) -> AppResult<AccessTokenRecord> {
        self.repository
            .find_active_token(hash_token(raw_token).as_str(), Utc::now())
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid or expired access token".to_owned()))
    }

    /// Records that the token was presented on an accepted request.
    pub async fn mark_used(&self, token_id: Uuid) -> AppResult<()> {
        self.repository.touch_token(token_id, Utc::now()).await
    }

    /// Revokes the presented token.
    pub async fn revoke(&self, raw_token: &str) -> AppResult<()> {
        self.repository
            .revoke_token(hash_token(raw_token).as_str(), Utc::now())
            .await
    }

    /// Revokes every token of `user_id`.
    pub async fn revoke_all(&self, user_id: UserId) -> AppResult<u64> {
        self.repository.revoke_all_for_user(user_id, Utc::now()).await
    }
}
