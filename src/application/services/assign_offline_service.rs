use crate::application::ports::AssignOfflineStore;
use crate::domain::entities::{OfflineGrade, OfflineSubmission};
use crate::domain::value_objects::{FeedbackPluginData, SiteId, SubmissionPluginData};
use crate::shared::error::AppError;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GradeDraft {
    pub grade: Option<f64>,
    pub attempt_number: i64,
    pub add_attempt: bool,
    pub workflow_state: Option<String>,
    pub apply_to_all: bool,
    pub outcomes: BTreeMap<i64, f64>,
    pub feedback: FeedbackPluginData,
}

/// Records edits made while the site is unreachable.
pub struct AssignOfflineService {
    store: Arc<dyn AssignOfflineStore>,
}

impl AssignOfflineService {
    pub fn new(store: Arc<dyn AssignOfflineStore>) -> Self {
        Self { store }
    }

    /// Saves submission content. An existing edit keeps its creation time
    /// and submit flag.
    pub async fn save_submission(
        &self,
        site: &SiteId,
        assign_id: i64,
        course_id: i64,
        user_id: i64,
        plugin_data: SubmissionPluginData,
        online_time_modified: i64,
    ) -> Result<OfflineSubmission, AppError> {
        let submission = match self.store.get_submission(site, assign_id, user_id).await? {
            Some(mut existing) => {
                existing.course_id = course_id;
                existing.plugin_data = plugin_data;
                existing.online_time_modified = online_time_modified;
                existing.time_modified = Utc::now().timestamp();
                existing
            }
            None => OfflineSubmission::new(
                assign_id,
                course_id,
                user_id,
                plugin_data,
                online_time_modified,
            ),
        };

        self.store.save_submission(site, &submission).await?;
        debug!(assign_id, user_id, site = %site, "offline submission saved");
        Ok(submission)
    }

    /// Flags an offline submission to be submitted for grading on next sync.
    pub async fn mark_submitted(
        &self,
        site: &SiteId,
        assign_id: i64,
        user_id: i64,
        accepted_statement: bool,
    ) -> Result<OfflineSubmission, AppError> {
        let submission = self
            .store
            .get_submission(site, assign_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No offline submission for assign {assign_id} and user {user_id}"
                ))
            })?
            .mark_submitted(accepted_statement);

        self.store.save_submission(site, &submission).await?;
        Ok(submission)
    }

    pub async fn save_grade(
        &self,
        site: &SiteId,
        assign_id: i64,
        course_id: i64,
        user_id: i64,
        draft: GradeDraft,
    ) -> Result<OfflineGrade, AppError> {
        if draft.grade.is_some_and(|grade| !grade.is_finite()) {
            return Err(AppError::ValidationError(
                "Grade must be a finite number".to_string(),
            ));
        }

        let mut grade = OfflineGrade::new(assign_id, course_id, user_id, draft.grade)
            .with_feedback(draft.feedback);
        grade.attempt_number = draft.attempt_number;
        grade.add_attempt = draft.add_attempt;
        grade.workflow_state = draft.workflow_state;
        grade.apply_to_all = draft.apply_to_all;
        grade.outcomes = draft.outcomes;

        self.store.save_grade(site, &grade).await?;
        debug!(assign_id, user_id, site = %site, "offline grade saved");
        Ok(grade)
    }

    /// Drops both offline edits of one user.
    pub async fn discard(
        &self,
        site: &SiteId,
        assign_id: i64,
        user_id: i64,
    ) -> Result<(), AppError> {
        self.store.delete_submission(site, assign_id, user_id).await?;
        self.store.delete_grade(site, assign_id, user_id).await?;
        Ok(())
    }
}

impl Default for GradeDraft {
    fn default() -> Self {
        Self {
            grade: None,
            attempt_number: -1,
            add_attempt: false,
            workflow_state: None,
            apply_to_all: false,
            outcomes: BTreeMap::new(),
            feedback: FeedbackPluginData::default(),
        }
    }
}
