//! Pure permission resolution.
//!
//! Precedence is fixed: the super admin sentinel is granted everything, an
//! explicit per-user override decides next, and the role default set is the
//! fallback. Storage lookups live in the application layer; everything here
//! works on already-loaded sets so it can be checked exhaustively.

use std::collections::{BTreeMap, BTreeSet};

use crate::permission::PermissionName;

/// Resolves a single grant decision.
#[must_use]
pub fn resolve_grant(is_super_admin: bool, override_grant: Option<bool>, role_default: bool) -> bool {
    if is_super_admin {
        return true;
    }

    override_grant.unwrap_or(role_default)
}

/// Per-permission resolution row used by the administration views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionResolution {
    /// Catalog permission.
    pub permission: PermissionName,
    /// Membership in the role default set.
    pub role_default: bool,
    /// Explicit override, if one exists.
    pub override_grant: Option<bool>,
    /// Final decision.
    pub effective: bool,
}

/// Inputs needed to resolve every catalog permission for one user.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    /// Whether the user holds the super admin sentinel role.
    pub is_super_admin: bool,
    /// Role default set. Empty for super admins.
    pub role_defaults: &'a BTreeSet<PermissionName>,
    /// Overrides keyed by permission.
    pub overrides: &'a BTreeMap<PermissionName, bool>,
}

impl ResolutionContext<'_> {
    /// Resolves one permission.
    #[must_use]
    pub fn resolve(&self, permission: &PermissionName) -> bool {
        resolve_grant(
            self.is_super_admin,
            self.overrides.get(permission).copied(),
            self.role_defaults.contains(permission),
        )
    }

    /// Resolves every catalog entry, preserving catalog order.
    #[must_use]
    pub fn breakdown<'p>(
        &self,
        catalog: impl IntoIterator<Item = &'p PermissionName>,
    ) -> Vec<PermissionResolution> {
        catalog
            .into_iter()
            .map(|permission| {
                let role_default = self.role_defaults.contains(permission);
                let override_grant = self.overrides.get(permission).copied();
                PermissionResolution {
                    permission: permission.clone(),
                    role_default,
                    override_grant,
                    effective: resolve_grant(self.is_super_admin, override_grant, role_default),
                }
            })
            .collect()
    }

    /// Returns the granted catalog permissions, sorted by name.
    #[must_use]
    pub fn effective_set<'p>(
        &self,
        catalog: impl IntoIterator<Item = &'p PermissionName>,
    ) -> BTreeSet<PermissionName> {
        catalog
            .into_iter()
            .filter(|permission| self.resolve(permission))
            .cloned()
            .collect()
    }
}
