use crate::domain::entities::{Assignment, GradeItem, SubmissionStatus};
use crate::domain::value_objects::{EditorText, SiteId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by the web-service client.
///
/// `Rejected` means the server answered and refused the request, so retrying
/// the same data cannot succeed. `Transport` covers everything that never got
/// an answer from the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WsError {
    #[error("{message}")]
    Rejected {
        code: Option<String>,
        message: String,
    },
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl WsError {
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        WsError::Rejected {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        WsError::Transport(message.into())
    }
}

/// Plugin data ready to be saved as the user's submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SubmissionUpload {
    pub online_text: Option<EditorText>,
    pub files_item_id: Option<i64>,
}

impl SubmissionUpload {
    pub fn is_empty(&self) -> bool {
        self.online_text.is_none() && self.files_item_id.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradingFormUpload {
    pub grade: Option<f64>,
    pub attempt_number: i64,
    pub add_attempt: bool,
    pub workflow_state: Option<String>,
    pub apply_to_all: bool,
    pub outcomes: BTreeMap<i64, f64>,
    pub feedback_comments: Option<EditorText>,
    pub feedback_files_item_id: Option<i64>,
}

#[async_trait]
pub trait AssignWebService: Send + Sync {
    async fn get_assignment_by_id(
        &self,
        site: &SiteId,
        course_id: i64,
        assign_id: i64,
    ) -> Result<Assignment, WsError>;

    async fn get_submission_status(
        &self,
        site: &SiteId,
        assign_id: i64,
        user_id: i64,
    ) -> Result<SubmissionStatus, WsError>;

    async fn save_submission_online(
        &self,
        site: &SiteId,
        assign_id: i64,
        upload: &SubmissionUpload,
    ) -> Result<(), WsError>;

    async fn submit_for_grading_online(
        &self,
        site: &SiteId,
        assign_id: i64,
        accept_statement: bool,
    ) -> Result<(), WsError>;

    async fn submit_grading_form_online(
        &self,
        site: &SiteId,
        assign_id: i64,
        user_id: i64,
        form: &GradingFormUpload,
    ) -> Result<(), WsError>;

    async fn get_grade_items(
        &self,
        site: &SiteId,
        course_id: i64,
        cmid: i64,
        user_id: i64,
    ) -> Result<Vec<GradeItem>, WsError>;

    /// Puts files into a fresh draft area and returns its item id.
    async fn upload_draft_files(
        &self,
        site: &SiteId,
        online_file_ids: &[i64],
        offline_files: &[PathBuf],
    ) -> Result<i64, WsError>;

    async fn invalidate_content(
        &self,
        site: &SiteId,
        cmid: i64,
        course_id: i64,
    ) -> Result<(), WsError>;
}
