use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult, CompanyId, UserId};

/// Role sentinel that bypasses every permission check. It has no role row.
pub const SUPER_ADMIN_ROLE: &str = "super_admin";

/// Role name of tenant administrators.
pub const COMPANY_ADMIN_ROLE: &str = "company_admin";

/// Coarse access tier used for route gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    /// Any authenticated, active user.
    Member,
    /// Administrator of one company.
    CompanyAdmin,
    /// Platform operator with cross-tenant access.
    SuperAdmin,
}

impl AccessTier {
    /// Derives the tier from a stored role name.
    #[must_use]
    pub fn from_role(role: &str) -> Self {
        match role {
            SUPER_ADMIN_ROLE => Self::SuperAdmin,
            COMPANY_ADMIN_ROLE => Self::CompanyAdmin,
            _ => Self::Member,
        }
    }

    /// Returns whether this tier may access a route requiring `required`.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        self >= required
    }

    /// Returns a stable label for logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::CompanyAdmin => "company_admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

/// Authenticated user attached to a request after the gate accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: UserId,
    display_name: String,
    email: String,
    role: String,
    company_id: Option<CompanyId>,
}

impl UserIdentity {
    /// Creates a user identity from the persisted account.
    #[must_use]
    pub fn new(
        user_id: UserId,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        company_id: Option<CompanyId>,
    ) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            email: email.into(),
            role: role.into(),
            company_id,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the login email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the stored role name.
    #[must_use]
    pub fn role(&self) -> &str {
        self.role.as_str()
    }

    /// Returns the company the user belongs to. `None` only for super admins.
    #[must_use]
    pub fn company_id(&self) -> Option<CompanyId> {
        self.company_id
    }

    /// Returns the coarse access tier for route gating.
    #[must_use]
    pub fn tier(&self) -> AccessTier {
        AccessTier::from_role(self.role.as_str())
    }

    /// Returns whether the user is the super admin sentinel role.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.tier() == AccessTier::SuperAdmin
    }

    /// Returns the tenant filter every tenant-scoped query must apply.
    pub fn tenant_scope(&self) -> AppResult<TenantScope> {
        if self.is_super_admin() {
            return Ok(TenantScope::AllCompanies);
        }

        self.company_id.map(TenantScope::Company).ok_or_else(|| {
            AppError::Forbidden(format!(
                "user '{}' is not attached to a company",
                self.user_id
            ))
        })
    }
}

/// Tenant filter applied at the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenantScope {
    /// Cross-tenant access reserved for super admins.
    AllCompanies,
    /// Rows of one company only.
    Company(CompanyId),
}

impl TenantScope {
    /// Returns the company filter, or `None` when unrestricted.
    #[must_use]
    pub fn company_id(&self) -> Option<CompanyId> {
        match self {
            Self::AllCompanies => None,
            Self::Company(company_id) => Some(*company_id),
        }
    }

    /// Returns whether a row owned by `owner` is visible in this scope.
    #[must_use]
    pub fn allows(&self, owner: Option<CompanyId>) -> bool {
        match self {
            Self::AllCompanies => true,
            Self::Company(company_id) => owner == Some(*company_id),
        }
    }
}
