use super::rows::{OfflineGradeRow, OfflineSubmissionRow};
use crate::domain::entities::{OfflineGrade, OfflineSubmission};
use crate::domain::value_objects::{FeedbackPluginData, SubmissionPluginData};
use crate::shared::error::AppError;
use std::collections::BTreeMap;

pub fn submission_from_row(row: OfflineSubmissionRow) -> Result<OfflineSubmission, AppError> {
    let plugin_data = SubmissionPluginData::from_json_str(&row.plugin_data)
        .map_err(AppError::DeserializationError)?;

    Ok(OfflineSubmission {
        assign_id: row.assign_id,
        course_id: row.course_id,
        user_id: row.user_id,
        plugin_data,
        online_time_modified: row.online_time_modified,
        submitted: row.submitted,
        submission_statement: row.submission_statement,
        time_created: row.time_created,
        time_modified: row.time_modified,
    })
}

pub fn grade_from_row(row: OfflineGradeRow) -> Result<OfflineGrade, AppError> {
    let plugin_data = FeedbackPluginData::from_json_str(&row.plugin_data)
        .map_err(AppError::DeserializationError)?;
    let outcomes: BTreeMap<i64, f64> = serde_json::from_str(&row.outcomes)?;

    Ok(OfflineGrade {
        assign_id: row.assign_id,
        course_id: row.course_id,
        user_id: row.user_id,
        grade: row.grade,
        attempt_number: row.attempt_number,
        add_attempt: row.add_attempt,
        workflow_state: row.workflow_state,
        apply_to_all: row.apply_to_all,
        outcomes,
        plugin_data,
        time_modified: row.time_modified,
    })
}
