//! User accounts: sign-in, the request gate and account status.
//!
//! Sign-in failures are deliberately indistinguishable: unknown email,
//! wrong password and disabled account all yield the same `Unauthorized`.

use std::sync::Arc;

use async_trait::async_trait;
use fleetdesk_core::{AppError, AppResult, CompanyId, TenantScope, UserId, UserIdentity};

use crate::{AccessTokenService, AuditRepository, IssuedAccessToken, NotificationService};

mod bootstrap;
mod login;
mod management;


/// User record returned by repository queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Canonical lowercase email address.
    pub email: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Owning company. `None` only for the super admin.
    pub company_id: Option<CompanyId>,
    /// Role name, or the super admin sentinel.
    pub role: String,
    /// Account status.
    pub is_active: bool,
    /// Status of the owning company. `true` when the user has no company.
    pub company_is_active: bool,
}

impl UserRecord {
    /// Returns the identity attached to authenticated requests.
    #[must_use]
    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(
            self.id,
            self.name.clone(),
            self.email.clone(),
            self.role.clone(),
            self.company_id,
        )
    }

    /// Returns whether the account and its company are both enabled.
    #[must_use]
    pub fn can_sign_in(&self) -> bool {
        self.is_active && self.company_is_active
    }
}

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by canonical email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Lists users visible in `scope`, ordered by name.
    async fn list_users(&self, scope: TenantScope) -> AppResult<Vec<UserRecord>>;

    /// Updates the account status.
    async fn set_active(&self, user_id: UserId, is_active: bool) -> AppResult<()>;

    /// Creates the super admin, or resets name, password and status of an
    /// existing super admin with that email.
    async fn upsert_super_admin(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> AppResult<UserId>;
}

/// Port for password hashing operations. Keeps domain/application free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    /// Newly issued bearer token.
    pub token: IssuedAccessToken,
    /// The signed-in user.
    pub user: UserIdentity,
}

/// Application service for user authentication and account status.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    access_token_service: AccessTokenService,
    notification_service: NotificationService,
    audit_repository: Arc<dyn AuditRepository>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        access_token_service: AccessTokenService,
        notification_service: NotificationService,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            access_token_service,
            notification_service,
            audit_repository,
        }
    }

    /// Finds a user visible to `actor`.
    ///
    /// Users outside the actor's tenant scope are reported as missing.
    pub async fn find_visible_user(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
    ) -> AppResult<UserRecord> {
        let scope = actor.tenant_scope()?;
        self.user_repository
            .find_by_id(user_id)
            .await?
            .filter(|user| scope.allows(user.company_id) || user.id == actor.user_id())
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }
}
