use super::error::SyncError;
use crate::domain::entities::AssignSyncResult;
use crate::domain::value_objects::SiteId;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use tokio::sync::Mutex;

pub type SyncOutcome = Result<AssignSyncResult, SyncError>;
pub type SharedSync = Shared<BoxFuture<'static, SyncOutcome>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyncKey {
    pub site: SiteId,
    pub assign_id: i64,
}

impl SyncKey {
    pub fn new(site: SiteId, assign_id: i64) -> Self {
        Self { site, assign_id }
    }
}

/// Syncs currently running, one per key.
///
/// Callers for a key that is already running get a clone of the same shared
/// future. The running future removes its own entry once it resolves.
#[derive(Default)]
pub struct OngoingSyncs {
    running: Mutex<HashMap<SyncKey, SharedSync>>,
}

impl OngoingSyncs {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &SyncKey) -> Option<SharedSync> {
        self.running.lock().await.get(key).cloned()
    }

    /// Registers `sync` for `key` unless another sync got there first, in
    /// which case the existing one is returned and `sync` is dropped unpolled.
    pub async fn start(&self, key: SyncKey, sync: BoxFuture<'static, SyncOutcome>) -> SharedSync {
        let mut running = self.running.lock().await;
        running.entry(key).or_insert_with(|| sync.shared()).clone()
    }

    pub async fn finish(&self, key: &SyncKey) {
        self.running.lock().await.remove(key);
    }

    pub async fn contains(&self, key: &SyncKey) -> bool {
        self.running.lock().await.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(assign_id: i64) -> SyncKey {
        SyncKey::new(SiteId::new("site").unwrap(), assign_id)
    }

    #[tokio::test]
    async fn second_start_returns_the_first_future() {
        let ongoing = OngoingSyncs::new();
        let first = ongoing
            .start(
                key(1),
                async {
                    Ok::<_, SyncError>(AssignSyncResult {
                        warnings: vec!["first".into()],
                        updated: true,
                    })
                }
                .boxed(),
            )
            .await;
        let second = ongoing
            .start(key(1), async { Ok::<_, SyncError>(AssignSyncResult::new()) }.boxed())
            .await;

        assert_eq!(first.await.unwrap().warnings, vec!["first"]);
        assert_eq!(second.await.unwrap().warnings, vec!["first"]);
    }

    #[tokio::test]
    async fn finish_removes_the_entry() {
        let ongoing = OngoingSyncs::new();
        ongoing
            .start(key(7), async { Ok::<_, SyncError>(AssignSyncResult::new()) }.boxed())
            .await;
        assert!(ongoing.contains(&key(7)).await);

        ongoing.finish(&key(7)).await;
        assert!(!ongoing.contains(&key(7)).await);
        assert!(ongoing.get(&key(7)).await.is_none());
    }

    #[tokio::test]
    async fn keys_differ_per_site() {
        let ongoing = OngoingSyncs::new();
        ongoing
            .start(key(1), async { Ok::<_, SyncError>(AssignSyncResult::new()) }.boxed())
            .await;
        let other_site = SyncKey::new(SiteId::new("other").unwrap(), 1);

        assert!(ongoing.get(&other_site).await.is_none());
    }
}
