use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use fleetdesk_application::{CompanyRecord, CompanyRepository};
use fleetdesk_core::{AppError, AppResult, CompanyId, TenantScope};

/// PostgreSQL-backed company reads.
#[derive(Clone)]
pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CompanyRow {
    id: uuid::Uuid,
    name: String,
    is_active: bool,
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn list_companies(&self, scope: TenantScope) -> AppResult<Vec<CompanyRecord>> {
        let rows = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT id, name, is_active
            FROM companies
            WHERE $1::UUID IS NULL OR id = $1
            ORDER BY name
            "#,
        )
        .bind(scope.company_id().map(|company_id| company_id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list companies: {error}")))?;

        Ok(rows
            .into_iter()
            .map(|row| CompanyRecord {
                id: CompanyId::from_uuid(row.id),
                name: row.name,
                is_active: row.is_active,
            })
            .collect())
    }
}
