use super::plugins::{prepare_submission_upload, remove_offline_files};
use super::{AssignSyncService, SyncError};
use crate::application::ports::WsError;
use crate::domain::entities::{AssignSyncResult, Assignment, OfflineSubmission};
use crate::domain::value_objects::SiteId;
use tracing::{debug, warn};

impl AssignSyncService {
    pub(super) async fn sync_submission(
        &self,
        site: &SiteId,
        assign: &Assignment,
        offline: OfflineSubmission,
    ) -> Result<AssignSyncResult, SyncError> {
        let status = self
            .web
            .get_submission_status(site, assign.id, offline.user_id)
            .await?;

        let server_time = status.submission_time_modified(assign.team_submission);
        if server_time != offline.online_time_modified {
            warn!(
                assign_id = assign.id,
                user_id = offline.user_id,
                server_time,
                captured_time = offline.online_time_modified,
                "submission changed on the server, discarding offline edit"
            );
            let reason = self
                .translator
                .translate("addon.mod_assign.warningsubmissionmodified", &[]);
            let result = self
                .discard_submission(site, assign, &offline, &reason)
                .await?;
            self.refresh_submission_status(site, assign.id, offline.user_id);
            return Ok(result);
        }

        match self.upload_submission(site, assign, &offline).await {
            Ok(()) => {
                self.store
                    .delete_submission(site, assign.id, offline.user_id)
                    .await?;
                remove_offline_files(offline.plugin_data.offline_files()).await;
                debug!(assign_id = assign.id, user_id = offline.user_id, "submission synced");
                Ok(AssignSyncResult {
                    warnings: Vec::new(),
                    updated: true,
                })
            }
            Err(WsError::Rejected { message, .. }) => {
                warn!(
                    assign_id = assign.id,
                    user_id = offline.user_id,
                    error = %message,
                    "server rejected offline submission"
                );
                self.discard_submission(site, assign, &offline, &message)
                    .await
            }
            Err(WsError::Transport(message)) => Err(SyncError::Transport(message)),
        }
    }

    async fn upload_submission(
        &self,
        site: &SiteId,
        assign: &Assignment,
        offline: &OfflineSubmission,
    ) -> Result<(), WsError> {
        let upload = prepare_submission_upload(self.web.as_ref(), site, &offline.plugin_data).await?;
        if !upload.is_empty() {
            self.web
                .save_submission_online(site, assign.id, &upload)
                .await?;
        }

        if offline.submitted && assign.submission_drafts {
            self.web
                .submit_for_grading_online(site, assign.id, offline.submission_statement)
                .await?;
        }

        Ok(())
    }

    async fn discard_submission(
        &self,
        site: &SiteId,
        assign: &Assignment,
        offline: &OfflineSubmission,
        reason: &str,
    ) -> Result<AssignSyncResult, SyncError> {
        self.store
            .delete_submission(site, assign.id, offline.user_id)
            .await?;
        remove_offline_files(offline.plugin_data.offline_files()).await;

        let mut result = AssignSyncResult::new();
        result.updated = true;
        result.add_warning(self.discard_warning(assign, reason));
        Ok(result)
    }

    /// Refetches the server status so later reads see the newer submission.
    /// Not awaited; its failure does not affect the sync.
    fn refresh_submission_status(&self, site: &SiteId, assign_id: i64, user_id: i64) {
        let web = self.web.clone();
        let site = site.clone();
        tokio::spawn(async move {
            if let Err(err) = web.get_submission_status(&site, assign_id, user_id).await {
                debug!(assign_id, user_id, error = %err, "submission status refresh failed");
            }
        });
    }
}
