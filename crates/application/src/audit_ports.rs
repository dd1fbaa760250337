use async_trait::async_trait;
use fleetdesk_core::{AppResult, CompanyId, UserId};
use fleetdesk_domain::AuditAction;

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Company the affected resource belongs to. `None` for platform-wide changes.
    pub company_id: Option<CompanyId>,
    /// User that performed the action. `None` for operator commands.
    pub actor_id: Option<UserId>,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
