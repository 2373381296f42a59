use crate::application::ports::AssignWebService;
use crate::application::services::{
    AssignOfflineService, AssignSyncCollaborators, AssignSyncService, SyncScheduler,
};
use crate::infrastructure::{
    BroadcastSyncEvents, ConnectivityMonitor, InMemorySyncBlocker, SqliteAssignOfflineStore,
    StaticCatalog,
};
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Wired-up offline assignment stack for one app instance.
#[derive(Clone)]
pub struct AssignSyncState {
    pub store: Arc<SqliteAssignOfflineStore>,
    pub offline: Arc<AssignOfflineService>,
    pub sync: AssignSyncService,
    pub scheduler: SyncScheduler,
    pub events: Arc<BroadcastSyncEvents>,
    pub blocker: Arc<InMemorySyncBlocker>,
    pub connectivity: Arc<ConnectivityMonitor>,
}

impl AssignSyncState {
    pub async fn initialize(
        config: AppConfig,
        web: Arc<dyn AssignWebService>,
    ) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;
        ensure_database_dir(&config.database.url)?;

        let store = Arc::new(SqliteAssignOfflineStore::connect(&config.database).await?);
        let events = Arc::new(BroadcastSyncEvents::new(config.sync.event_capacity));
        let blocker = Arc::new(InMemorySyncBlocker::new());
        let connectivity = Arc::new(ConnectivityMonitor::default());

        let sync = AssignSyncService::new(
            AssignSyncCollaborators {
                web,
                store: store.clone(),
                sync_state: store.clone(),
                blocker: blocker.clone(),
                network: connectivity.clone(),
                events: events.clone(),
                translator: Arc::new(StaticCatalog::english()),
            },
            &config.sync,
        );
        let scheduler = SyncScheduler::new(sync.clone(), config.sync.clone());
        let offline = Arc::new(AssignOfflineService::new(store.clone()));

        info!(database = %config.database.url, "assign sync state initialized");

        Ok(Self {
            store,
            offline,
            sync,
            scheduler,
            events,
            blocker,
            connectivity,
        })
    }
}

/// Creates the parent directory of a file-backed SQLite url.
fn ensure_database_dir(url: &str) -> Result<(), AppError> {
    let Some(path) = url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let path = path.trim_start_matches("//");
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
        _ => {}
    }
    Ok(())
}
