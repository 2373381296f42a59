//! Offline sync for assignment submissions and grades.
//!
//! Edits made while offline are reconciled against the server one entity at
//! a time. An edit only reaches the server when the server copy has not moved
//! since the edit was captured; otherwise the edit is dropped and a warning is
//! reported. At most one sync runs per assignment and site.

mod error;
mod grade;
mod ongoing;
mod plugins;
mod submission;


pub use error::SyncError;
pub use ongoing::{OngoingSyncs, SyncKey, SyncOutcome};

use crate::application::ports::{
    AssignOfflineStore, AssignWebService, NetworkStatus, SyncBlocker, SyncEventPublisher,
    SyncStateStore, Translator, UnreadableEdit,
};
use crate::domain::entities::{AssignSyncEvent, AssignSyncResult, Assignment, BatchSyncSummary};
use crate::domain::value_objects::SiteId;
use crate::shared::config::SyncConfig;
use chrono::Utc;
use futures::future::{self, FutureExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Component name used for block checks and sync timestamps.
pub const ASSIGN_COMPONENT: &str = "mmaModAssign";

/// Everything the sync service talks to.
#[derive(Clone)]
pub struct AssignSyncCollaborators {
    pub web: Arc<dyn AssignWebService>,
    pub store: Arc<dyn AssignOfflineStore>,
    pub sync_state: Arc<dyn SyncStateStore>,
    pub blocker: Arc<dyn SyncBlocker>,
    pub network: Arc<dyn NetworkStatus>,
    pub events: Arc<dyn SyncEventPublisher>,
    pub translator: Arc<dyn Translator>,
}

#[derive(Clone)]
pub struct AssignSyncService {
    web: Arc<dyn AssignWebService>,
    store: Arc<dyn AssignOfflineStore>,
    sync_state: Arc<dyn SyncStateStore>,
    blocker: Arc<dyn SyncBlocker>,
    network: Arc<dyn NetworkStatus>,
    events: Arc<dyn SyncEventPublisher>,
    translator: Arc<dyn Translator>,
    ongoing: Arc<OngoingSyncs>,
    min_sync_interval: i64,
}

impl AssignSyncService {
    pub fn new(collaborators: AssignSyncCollaborators, config: &SyncConfig) -> Self {
        Self {
            web: collaborators.web,
            store: collaborators.store,
            sync_state: collaborators.sync_state,
            blocker: collaborators.blocker,
            network: collaborators.network,
            events: collaborators.events,
            translator: collaborators.translator,
            ongoing: Arc::new(OngoingSyncs::new()),
            min_sync_interval: i64::try_from(config.min_sync_interval).unwrap_or(i64::MAX),
        }
    }

    pub async fn has_data_to_sync(&self, site: &SiteId, assign_id: i64) -> Result<bool, SyncError> {
        Ok(self.store.has_data(site, assign_id).await?)
    }

    pub async fn is_syncing(&self, site: &SiteId, assign_id: i64) -> bool {
        self.ongoing
            .contains(&SyncKey::new(site.clone(), assign_id))
            .await
    }

    /// Whether the minimum interval has elapsed since the last sync.
    pub async fn is_sync_needed(&self, site: &SiteId, assign_id: i64) -> Result<bool, SyncError> {
        let last_sync = self
            .sync_state
            .get_sync_time(site, ASSIGN_COMPONENT, assign_id)
            .await?
            .unwrap_or(0);
        let elapsed = Utc::now().timestamp().saturating_sub(last_sync);
        Ok(elapsed >= self.min_sync_interval)
    }

    /// Runs [`Self::sync_assign`] unless the assignment synced recently.
    ///
    /// Returns `Ok(None)` when the sync was skipped.
    pub async fn sync_assign_if_needed(
        &self,
        site: &SiteId,
        assign_id: i64,
    ) -> Result<Option<AssignSyncResult>, SyncError> {
        if !self.is_sync_needed(site, assign_id).await? {
            debug!(assign_id, site = %site, "assign synced recently, skipping");
            return Ok(None);
        }
        self.sync_assign(site, assign_id).await.map(Some)
    }

    pub async fn sync_assign(
        &self,
        site: &SiteId,
        assign_id: i64,
    ) -> Result<AssignSyncResult, SyncError> {
        let key = SyncKey::new(site.clone(), assign_id);

        if let Some(running) = self.ongoing.get(&key).await {
            debug!(assign_id, site = %site, "assign already syncing, waiting for it");
            return running.await;
        }

        if self.blocker.is_blocked(ASSIGN_COMPONENT, assign_id, site) {
            debug!(assign_id, site = %site, "cannot sync assign, it is blocked");
            let component = self.translator.translate("addon.mod_assign.modulename", &[]);
            return Err(SyncError::Blocked(
                self.translator
                    .translate("core.errorsyncblocked", &[("$a", component.as_str())]),
            ));
        }

        let this = self.clone();
        let task_key = key.clone();
        let task = async move {
            let outcome = this.perform_sync(&task_key.site, task_key.assign_id).await;
            this.ongoing.finish(&task_key).await;
            outcome
        }
        .boxed();

        self.ongoing.start(key, task).await.await
    }

    /// Syncs every assignment with offline data, on one site or on all of them.
    ///
    /// With `force` the minimum interval is ignored. Failures are logged and
    /// counted; they never stop the other assignments.
    pub async fn sync_all_assignments(
        &self,
        site: Option<&SiteId>,
        force: bool,
    ) -> Result<BatchSyncSummary, SyncError> {
        let sites = match site {
            Some(site) => vec![site.clone()],
            None => self.store.list_sites_with_data().await?,
        };

        let mut targets = Vec::new();
        for site in sites {
            for assign_id in self.store.list_assign_ids_with_data(&site).await? {
                targets.push((site.clone(), assign_id));
            }
        }

        info!(count = targets.len(), force, "syncing assignments with offline data");

        let outcomes = future::join_all(targets.iter().map(|(site, assign_id)| async move {
            if force {
                self.sync_assign(site, *assign_id).await.map(Some)
            } else {
                self.sync_assign_if_needed(site, *assign_id).await
            }
        }))
        .await;

        let mut summary = BatchSyncSummary::default();
        for ((site, assign_id), outcome) in targets.into_iter().zip(outcomes) {
            match outcome {
                Ok(Some(result)) => {
                    summary.synced_count += 1;
                    if result.updated {
                        self.events.publish(AssignSyncEvent::AutoSynced {
                            site_id: site,
                            assign_id,
                            warnings: result.warnings,
                        });
                    }
                }
                Ok(None) => summary.skipped_count += 1,
                Err(err) => {
                    summary.failed_count += 1;
                    warn!(assign_id, site = %site, error = %err, "assign sync failed");
                }
            }
        }

        Ok(summary)
    }

    async fn perform_sync(
        &self,
        site: &SiteId,
        assign_id: i64,
    ) -> Result<AssignSyncResult, SyncError> {
        info!(assign_id, site = %site, "try to sync assign");

        let submissions = self.store.get_submissions(site, assign_id).await?;
        let grades = self.store.get_grades(site, assign_id).await?;
        let mut result = AssignSyncResult::new();

        if submissions.is_empty() && grades.is_empty() {
            self.stamp_sync_time(site, assign_id).await;
            return Ok(result);
        }

        if !self.network.is_online().await {
            return Err(SyncError::Offline(
                self.translator.translate("core.networkerrormsg", &[]),
            ));
        }

        let course_id = submissions
            .edits
            .first()
            .map(|submission| submission.course_id)
            .or_else(|| grades.edits.first().map(|grade| grade.course_id))
            .or_else(|| {
                submissions
                    .unreadable
                    .iter()
                    .chain(&grades.unreadable)
                    .next()
                    .map(|edit| edit.course_id)
            })
            .unwrap_or_default();
        let assign = self
            .web
            .get_assignment_by_id(site, course_id, assign_id)
            .await?;

        result.merge(
            self.discard_unreadable(site, &assign, &submissions.unreadable, &grades.unreadable)
                .await?,
        );

        let (submission_outcomes, grade_outcomes) = future::join(
            future::join_all(
                submissions
                    .edits
                    .into_iter()
                    .map(|submission| self.sync_submission(site, &assign, submission)),
            ),
            future::join_all(
                grades
                    .edits
                    .into_iter()
                    .map(|grade| self.sync_grade(site, &assign, grade)),
            ),
        )
        .await;

        for outcome in submission_outcomes.into_iter().chain(grade_outcomes) {
            result.merge(outcome?);
        }

        if result.updated {
            self.invalidate(site, &assign).await;
        }
        self.stamp_sync_time(site, assign_id).await;

        info!(
            assign_id,
            site = %site,
            updated = result.updated,
            warnings = result.warnings.len(),
            "assign synced"
        );
        Ok(result)
    }

    /// Drops stored edits that can no longer be decoded, one warning each.
    async fn discard_unreadable(
        &self,
        site: &SiteId,
        assign: &Assignment,
        submissions: &[UnreadableEdit],
        grades: &[UnreadableEdit],
    ) -> Result<AssignSyncResult, SyncError> {
        let mut result = AssignSyncResult::new();

        for edit in submissions {
            warn!(
                assign_id = assign.id,
                user_id = edit.user_id,
                "discarding unreadable offline submission"
            );
            self.store
                .delete_submission(site, assign.id, edit.user_id)
                .await?;
            result.updated = true;
            result.add_warning(self.discard_warning(assign, &edit.reason));
        }
        for edit in grades {
            warn!(
                assign_id = assign.id,
                user_id = edit.user_id,
                "discarding unreadable offline grade"
            );
            self.store.delete_grade(site, assign.id, edit.user_id).await?;
            result.updated = true;
            result.add_warning(self.discard_warning(assign, &edit.reason));
        }

        Ok(result)
    }

    async fn invalidate(&self, site: &SiteId, assign: &Assignment) {
        if let Err(err) = self
            .web
            .invalidate_content(site, assign.cmid, assign.course_id)
            .await
        {
            debug!(assign_id = assign.id, error = %err, "failed to invalidate assign content");
        }
    }

    async fn stamp_sync_time(&self, site: &SiteId, assign_id: i64) {
        let now = Utc::now().timestamp();
        if let Err(err) = self
            .sync_state
            .set_sync_time(site, ASSIGN_COMPONENT, assign_id, now)
            .await
        {
            warn!(assign_id, site = %site, error = %err, "failed to store sync time");
        }
    }

    /// Localized "offline data deleted" warning for this assignment.
    fn discard_warning(&self, assign: &Assignment, reason: &str) -> String {
        let component = self.translator.translate("addon.mod_assign.modulename", &[]);
        self.translator.translate(
            "core.warningofflinedatadeleted",
            &[
                ("component", component.as_str()),
                ("name", assign.name.as_str()),
                ("error", reason),
            ],
        )
    }
}
