use super::plugins::{prepare_grading_form, remove_offline_files};
use super::{AssignSyncService, SyncError};
use crate::application::ports::WsError;
use crate::domain::entities::{AssignSyncResult, Assignment, OfflineGrade};
use crate::domain::value_objects::SiteId;
use tracing::{debug, warn};

impl AssignSyncService {
    pub(super) async fn sync_grade(
        &self,
        site: &SiteId,
        assign: &Assignment,
        offline: OfflineGrade,
    ) -> Result<AssignSyncResult, SyncError> {
        let status = self
            .web
            .get_submission_status(site, assign.id, offline.user_id)
            .await?;

        let feedback_time = status.feedback_time_modified();
        if feedback_time > offline.time_modified {
            warn!(
                assign_id = assign.id,
                user_id = offline.user_id,
                feedback_time,
                edit_time = offline.time_modified,
                "grade changed on the server, discarding offline grade"
            );
            let reason = self
                .translator
                .translate("addon.mod_assign.warningsubmissiongrademodified", &[]);
            return self.discard_grade(site, assign, &offline, &reason).await;
        }

        let items = self
            .web
            .get_grade_items(site, assign.course_id, assign.cmid, offline.user_id)
            .await?;
        let mut grade = offline.clone();
        if grade.merge_gradebook(&items) {
            debug!(
                assign_id = assign.id,
                user_id = offline.user_id,
                "gradebook is newer than the offline grade, using gradebook values"
            );
        }

        match self.upload_grade(site, assign, &grade).await {
            Ok(()) => {
                self.store
                    .delete_grade(site, assign.id, offline.user_id)
                    .await?;
                remove_offline_files(offline.plugin_data.offline_files()).await;
                debug!(assign_id = assign.id, user_id = offline.user_id, "grade synced");
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
                    "server rejected offline grade"
                );
                self.discard_grade(site, assign, &offline, &message).await
            }
            Err(WsError::Transport(message)) => Err(SyncError::Transport(message)),
        }
    }

    async fn upload_grade(
        &self,
        site: &SiteId,
        assign: &Assignment,
        grade: &OfflineGrade,
    ) -> Result<(), WsError> {
        let form = prepare_grading_form(self.web.as_ref(), site, grade).await?;
        self.web
            .submit_grading_form_online(site, assign.id, grade.user_id, &form)
            .await
    }

    async fn discard_grade(
        &self,
        site: &SiteId,
        assign: &Assignment,
        offline: &OfflineGrade,
        reason: &str,
    ) -> Result<AssignSyncResult, SyncError> {
        self.store
            .delete_grade(site, assign.id, offline.user_id)
            .await?;
        remove_offline_files(offline.plugin_data.offline_files()).await;

        let mut result = AssignSyncResult::new();
        result.updated = true;
        result.add_warning(self.discard_warning(assign, reason));
        Ok(result)
    }
}
