use std::str::FromStr;

use fleetdesk_core::AppError;
use serde::{Deserialize, Serialize};

/// Category of an in-app notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A user's permission overrides changed.
    UserPermissionsChanged,
    /// A user account was disabled.
    UserDeactivated,
}

impl NotificationKind {
    /// Returns a stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserPermissionsChanged => "user_permissions_changed",
            Self::UserDeactivated => "user_deactivated",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user_permissions_changed" => Ok(Self::UserPermissionsChanged),
            "user_deactivated" => Ok(Self::UserDeactivated),
            _ => Err(AppError::Validation(format!(
                "unknown notification kind '{value}'"
            ))),
        }
    }
}
