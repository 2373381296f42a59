pub mod assign_offline_service;
pub mod assign_sync;
pub mod sync_scheduler;
#[cfg(test)]
pub(crate) mod test_support;

pub use assign_offline_service::{AssignOfflineService, GradeDraft};
pub use assign_sync::{ASSIGN_COMPONENT, AssignSyncCollaborators, AssignSyncService, SyncError};
pub use sync_scheduler::{SchedulerStatus, SyncScheduler};
