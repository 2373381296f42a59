//! Offline synchronisation of assignment submissions and grades.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod state;

pub use application::services::{
    AssignOfflineService, AssignSyncCollaborators, AssignSyncService, SyncError, SyncScheduler,
};
pub use domain::entities::{AssignSyncEvent, AssignSyncResult, BatchSyncSummary};
pub use domain::value_objects::SiteId;
pub use shared::{AppConfig, AppError, SyncConfig};
pub use state::AssignSyncState;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assign_sync=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
