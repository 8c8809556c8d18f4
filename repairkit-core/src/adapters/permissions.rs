use repairkit_domain::ports::PermissionOracle;
use repairkit_types::ActorId;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

/// Explicit per-actor permission grants.
#[derive(Debug, Default)]
pub struct PermissionSet {
    grants: Mutex<HashMap<ActorId, HashSet<String>>>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, actor: ActorId, permission: impl Into<String>) {
        self.grants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(actor)
            .or_default()
            .insert(permission.into());
    }

    pub fn revoke(&self, actor: &ActorId, permission: &str) -> bool {
        self.grants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(actor)
            .is_some_and(|set| set.remove(permission))
    }
}

impl PermissionOracle for PermissionSet {
    fn has_permission(&self, actor: &ActorId, permission: &str) -> bool {
        self.grants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(actor)
            .is_some_and(|set| set.contains(permission))
    }
}
