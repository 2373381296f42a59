use crate::domain::entities::AssignSyncEvent;
use crate::domain::value_objects::SiteId;
use async_trait::async_trait;

/// Locks held elsewhere in the app, e.g. while an edit form is open.
pub trait SyncBlocker: Send + Sync {
    fn is_blocked(&self, component: &str, id: i64, site: &SiteId) -> bool;
}

#[async_trait]
pub trait NetworkStatus: Send + Sync {
    async fn is_online(&self) -> bool;
}

pub trait SyncEventPublisher: Send + Sync {
    fn publish(&self, event: AssignSyncEvent);
}

pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;
}
