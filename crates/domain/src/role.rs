use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use fleetdesk_core::{AppError, AppResult, SUPER_ADMIN_ROLE};
use serde::{Deserialize, Serialize};

use crate::permission::{PermissionName, validate_snake_case_name};

/// Validated role name such as `rental_agent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Creates a validated role name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        validate_snake_case_name("role", value.as_str())?;
        Ok(Self(value))
    }

    /// Returns the stored name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether this is the super admin sentinel, which never has a role row.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.0 == SUPER_ADMIN_ROLE
    }
}

impl TryFrom<String> for RoleName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl Display for RoleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Role with its default permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDefinition {
    /// Unique role name.
    pub name: RoleName,
    /// Human readable label.
    pub display_name: String,
    /// Optional description.
    pub description: Option<String>,
    /// System roles keep their seeded defaults.
    pub is_system: bool,
    /// Default permissions granted to every holder of the role.
    pub permissions: BTreeSet<PermissionName>,
}

impl RoleDefinition {
    /// Fails with `Forbidden` when the role's defaults are locked.
    pub fn ensure_editable(&self) -> AppResult<()> {
        if self.is_system {
            return Err(AppError::Forbidden(format!(
                "system role '{}' cannot be modified",
                self.name
            )));
        }

        Ok(())
    }

    /// Returns whether the role grants `permission` by default.
    #[must_use]
    pub fn grants(&self, permission: &PermissionName) -> bool {
        self.permissions.contains(permission)
    }
}
