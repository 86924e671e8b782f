//! Permission table driven by configuration.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{AccessDenied, Permission};
use crate::infrastructure::traits::PermissionCheck;

/// Grants exactly the configured permissions.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    granted: HashSet<Permission>,
}

impl StaticPermissions {
    pub fn new(granted: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            granted: granted.into_iter().collect(),
        }
    }

    pub fn allow_all() -> Self {
        Self::new([Permission::CreateView, Permission::ConfigureView])
    }
}

impl PermissionCheck for StaticPermissions {
    fn check(&self, permission: Permission) -> Result<(), AccessDenied> {
        if self.granted.contains(&permission) {
            return Ok(());
        }
        debug!("check: {} not granted", permission);
        Err(AccessDenied {
            permission,
            reason: "not granted by configuration".to_string(),
        })
    }
}
