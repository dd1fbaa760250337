use std::sync::Arc;

use async_trait::async_trait;
use fleetdesk_core::{AppResult, CompanyId, TenantScope, UserIdentity};

/// Company projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    /// Company identifier.
    pub id: CompanyId,
    /// Company name.
    pub name: String,
    /// Disabled companies lock out all of their users.
    pub is_active: bool,
}

/// Repository port for company reads.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Lists companies visible in `scope`, ordered by name.
    async fn list_companies(&self, scope: TenantScope) -> AppResult<Vec<CompanyRecord>>;
}

/// Application service for tenant-scoped company reads.
#[derive(Clone)]
pub struct CompanyService {
    repository: Arc<dyn CompanyRepository>,
}

impl CompanyService {
    /// Creates a company service.
    #[must_use]
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    /// Lists every company for super admins, the caller's own company otherwise.
    pub async fn list_companies(&self, actor: &UserIdentity) -> AppResult<Vec<CompanyRecord>> {
        self.repository.list_companies(actor.tenant_scope()?).await
    }
}
