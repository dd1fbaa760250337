mod overrides;
mod repositories;

pub use overrides::{OverrideChange, UserPermissionBreakdown};
pub use repositories::SecurityAdminRepository;
