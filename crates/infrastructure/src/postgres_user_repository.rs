//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use fleetdesk_application::{UserRecord, UserRepository};
use fleetdesk_core::{AppError, AppResult, CompanyId, TenantScope, UserId};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    name: String,
    email: String,
    password_hash: String,
    company_id: Option<uuid::Uuid>,
    role: String,
    is_active: bool,
    company_is_active: Option<bool>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            company_id: row.company_id.map(CompanyId::from_uuid),
            role: row.role,
            is_active: row.is_active,
            company_is_active: row.company_is_active.unwrap_or(true),
        }
    }
}

/// Shared projection; the company flag is `NULL` for the super admin.
const USER_SELECT: &str = r#"
    SELECT
        users.id,
        users.name,
        users.email,
        users.password_hash,
        users.company_id,
        users.role,
        users.is_active,
        companies.is_active AS company_is_active
    FROM users
    LEFT JOIN companies
        ON companies.id = users.company_id
"#;

mod account;
mod lookup;


#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        self.find_by_email_impl(email).await
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        self.find_by_id_impl(user_id).await
    }

    async fn list_users(&self, scope: TenantScope) -> AppResult<Vec<UserRecord>> {
        self.list_users_impl(scope).await
    }

    async fn set_active(&self, user_id: UserId, is_active: bool) -> AppResult<()> {
        self.set_active_impl(user_id, is_active).await
    }

    async fn upsert_super_admin(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> AppResult<UserId> {
        self.upsert_super_admin_impl(email, name, password_hash).await
    }
}
