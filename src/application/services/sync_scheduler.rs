use crate::application::services::assign_sync::{AssignSyncService, SyncError};
use crate::domain::entities::BatchSyncSummary;
use crate::shared::config::SyncConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStatus {
    pub is_running: bool,
    pub last_run: Option<i64>,
    pub runs: u32,
    pub errors: u32,
    pub last_summary: Option<BatchSyncSummary>,
}

/// Periodic background pass over every site with offline assignment data.
pub struct SyncScheduler {
    service: AssignSyncService,
    config: SyncConfig,
    status: Arc<RwLock<SchedulerStatus>>,
    /// Held for the length of a pass; released even if the pass is dropped.
    pass: Arc<Mutex<()>>,
}

impl SyncScheduler {
    pub fn new(service: AssignSyncService, config: SyncConfig) -> Self {
        Self {
            service,
            config,
            status: Arc::new(RwLock::new(SchedulerStatus::default())),
            pass: Arc::new(Mutex::new(())),
        }
    }

    /// One pass of the batch driver, honouring the minimum sync interval.
    ///
    /// Overlapping passes are skipped.
    pub async fn run_once(&self) -> Result<Option<BatchSyncSummary>, SyncError> {
        let Ok(_pass) = self.pass.try_lock() else {
            debug!("assign sync pass already running");
            return Ok(None);
        };

        let outcome = self.service.sync_all_assignments(None, false).await;

        let mut status = self.status.write().await;
        status.runs += 1;
        status.last_run = Some(chrono::Utc::now().timestamp());
        match &outcome {
            Ok(summary) => status.last_summary = Some(summary.clone()),
            Err(_) => status.errors += 1,
        }

        outcome.map(Some)
    }

    pub async fn get_status(&self) -> SchedulerStatus {
        let mut status = self.status.read().await.clone();
        status.is_running = self.pass.try_lock().is_err();
        status
    }

    /// Spawns the periodic pass. Returns `None` when automatic sync is off.
    pub fn schedule(&self) -> Option<JoinHandle<()>> {
        if !self.config.auto_sync {
            info!("automatic assign sync disabled");
            return None;
        }

        let scheduler = self.clone();
        let period = tokio::time::Duration::from_secs(self.config.cron_interval.max(1));
        Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);

            loop {
                interval.tick().await;

                match scheduler.run_once().await {
                    Ok(Some(summary)) => debug!(
                        synced = summary.synced_count,
                        skipped = summary.skipped_count,
                        failed = summary.failed_count,
                        "assign sync pass finished"
                    ),
                    Ok(None) => {}
                    Err(e) => error!("Assign sync pass error: {}", e),
                }
            }
        }))
    }
}

impl Clone for SyncScheduler {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            config: self.config.clone(),
            status: self.status.clone(),
            pass: self.pass.clone(),
        }
    }
}
