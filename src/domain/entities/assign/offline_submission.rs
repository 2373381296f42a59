use crate::domain::value_objects::SubmissionPluginData;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Submission edited while offline, waiting to be sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfflineSubmission {
    pub assign_id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub plugin_data: SubmissionPluginData,
    /// Server `timemodified` of the submission when the edit started.
    pub online_time_modified: i64,
    pub submitted: bool,
    pub submission_statement: bool,
    pub time_created: i64,
    pub time_modified: i64,
}

impl OfflineSubmission {
    pub fn new(
        assign_id: i64,
        course_id: i64,
        user_id: i64,
        plugin_data: SubmissionPluginData,
        online_time_modified: i64,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            assign_id,
            course_id,
            user_id,
            plugin_data,
            online_time_modified,
            submitted: false,
            submission_statement: false,
            time_created: now,
            time_modified: now,
        }
    }

    pub fn mark_submitted(mut self, accepted_statement: bool) -> Self {
        self.submitted = true;
        self.submission_statement = accepted_statement;
        self.time_modified = Utc::now().timestamp();
        self
    }
}
