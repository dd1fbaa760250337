//! Fixtures for repository tests that run against `DATABASE_URL`.
//!
//! Every fixture uses fresh identifiers so tests can share one database.

use fleetdesk_core::{COMPANY_ADMIN_ROLE, CompanyId, SUPER_ADMIN_ROLE, UserId};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Returns a migrated pool, or `None` when no database is configured.
pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres repository tests: {error}");
    }

    Some(pool)
}

pub(crate) async fn insert_company(pool: &PgPool, name: &str) -> CompanyId {
    let company_id = CompanyId::new();
    let insert = sqlx::query("INSERT INTO companies (id, name) VALUES ($1, $2)")
        .bind(company_id.as_uuid())
        .bind(name)
        .execute(pool)
        .await;

    assert!(insert.is_ok());
    company_id
}

pub(crate) async fn insert_user(pool: &PgPool, role: &str, company_id: Option<CompanyId>) -> UserId {
    let user_id = UserId::new();
    let insert = sqlx::query(
        r#"
        INSERT INTO users (id, company_id, name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, 'not-a-real-hash', $5)
        "#,
    )
    .bind(user_id.as_uuid())
    .bind(company_id.map(|company_id| company_id.as_uuid()))
    .bind(format!("{role} fixture"))
    .bind(format!("{}@fixture.test", user_id.as_uuid().simple()))
    .bind(role)
    .execute(pool)
    .await;

    assert!(insert.is_ok());
    user_id
}

pub(crate) async fn insert_company_admin(pool: &PgPool, company_id: CompanyId) -> UserId {
    insert_user(pool, COMPANY_ADMIN_ROLE, Some(company_id)).await
}

pub(crate) async fn insert_super_admin(pool: &PgPool) -> UserId {
    insert_user(pool, SUPER_ADMIN_ROLE, None).await
}
