use crate::application::ports::SyncBlocker;
use crate::domain::value_objects::SiteId;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::debug;

type BlockKey = (SiteId, String, i64);

/// Per-entity sync locks, each held by one or more named operations.
#[derive(Default)]
pub struct InMemorySyncBlocker {
    blocks: Mutex<HashMap<BlockKey, HashSet<String>>>,
}

impl InMemorySyncBlocker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self, component: &str, id: i64, site: &SiteId, operation: &str) {
        let mut blocks = self.blocks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        blocks
            .entry((site.clone(), component.to_string(), id))
            .or_default()
            .insert(operation.to_string());
        debug!(component, id, site = %site, operation, "sync blocked");
    }

    /// Releases one operation's lock. The entity stays blocked while any
    /// other operation still holds it.
    pub fn unblock(&self, component: &str, id: i64, site: &SiteId, operation: &str) {
        let mut blocks = self.blocks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let key = (site.clone(), component.to_string(), id);
        if let Some(operations) = blocks.get_mut(&key) {
            operations.remove(operation);
            if operations.is_empty() {
                blocks.remove(&key);
            }
        }
        debug!(component, id, site = %site, operation, "sync unblocked");
    }

    pub fn clear_site(&self, site: &SiteId) {
        let mut blocks = self.blocks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        blocks.retain(|(blocked_site, _, _), _| blocked_site != site);
    }
}

impl SyncBlocker for InMemorySyncBlocker {
    fn is_blocked(&self, component: &str, id: i64, site: &SiteId) -> bool {
        let blocks = self.blocks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        blocks.contains_key(&(site.clone(), component.to_string(), id))
    }
}
