#![allow(dead_code)]

use assign_sync::application::ports::{
    AssignWebService, GradingFormUpload, SubmissionUpload, WsError,
};
use assign_sync::domain::entities::assign::{LastAttempt, ServerSubmission};
use assign_sync::domain::entities::{Assignment, GradeItem, SubmissionState, SubmissionStatus};
use assign_sync::{AppConfig, AssignSyncState, SiteId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::RwLock;

pub const COURSE_ID: i64 = 5;
pub const USER_ID: i64 = 42;
pub const SERVER_TIME: i64 = 1_700_000_000;

/// In-memory site: assignments, submission times and a log of what was sent.
#[derive(Clone, Default)]
pub struct FakeAssignSite {
    assignments: Arc<RwLock<HashMap<i64, Assignment>>>,
    submission_times: Arc<RwLock<HashMap<(i64, i64), i64>>>,
    reject_uploads: Arc<RwLock<Option<String>>>,
    fail_transport: Arc<RwLock<bool>>,
    saved: Arc<RwLock<Vec<(i64, SubmissionUpload)>>>,
    submitted_for_grading: Arc<RwLock<Vec<i64>>>,
    grading_forms: Arc<RwLock<Vec<(i64, i64, GradingFormUpload)>>>,
    invalidations: Arc<RwLock<u32>>,
}

impl FakeAssignSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_assignment(&self, id: i64, name: &str) {
        self.assignments.write().await.insert(
            id,
            Assignment {
                id,
                cmid: id * 10,
                course_id: COURSE_ID,
                name: name.to_string(),
                submission_drafts: true,
                team_submission: false,
                max_grade: Some(100.0),
            },
        );
    }

    pub async fn set_submission_time(&self, assign_id: i64, user_id: i64, time: i64) {
        self.submission_times
            .write()
            .await
            .insert((assign_id, user_id), time);
    }

    pub async fn reject_uploads(&self, message: &str) {
        *self.reject_uploads.write().await = Some(message.to_string());
    }

    pub async fn set_transport_failure(&self, failing: bool) {
        *self.fail_transport.write().await = failing;
    }

    pub async fn saved(&self) -> Vec<(i64, SubmissionUpload)> {
        self.saved.read().await.clone()
    }

    pub async fn submitted_for_grading(&self) -> Vec<i64> {
        self.submitted_for_grading.read().await.clone()
    }

    pub async fn grading_forms(&self) -> Vec<(i64, i64, GradingFormUpload)> {
        self.grading_forms.read().await.clone()
    }

    pub async fn invalidations(&self) -> u32 {
        *self.invalidations.read().await
    }

    async fn check_upload(&self) -> Result<(), WsError> {
        if *self.fail_transport.read().await {
            return Err(WsError::transport("connection reset by peer"));
        }
        match self.reject_uploads.read().await.clone() {
            Some(message) => Err(WsError::rejected("invalidparameter", message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AssignWebService for FakeAssignSite {
    async fn get_assignment_by_id(
        &self,
        _site: &SiteId,
        _course_id: i64,
        assign_id: i64,
    ) -> Result<Assignment, WsError> {
        self.assignments
            .read()
            .await
            .get(&assign_id)
            .cloned()
            .ok_or_else(|| WsError::rejected("invalidrecord", "Can't find data record in database."))
    }

    async fn get_submission_status(
        &self,
        _site: &SiteId,
        assign_id: i64,
        user_id: i64,
    ) -> Result<SubmissionStatus, WsError> {
        let time = self
            .submission_times
            .read()
            .await
            .get(&(assign_id, user_id))
            .copied()
            .unwrap_or(SERVER_TIME);
        Ok(SubmissionStatus {
            last_attempt: Some(LastAttempt {
                submission: Some(ServerSubmission {
                    id: assign_id * 100 + user_id,
                    user_id,
                    status: SubmissionState::Draft,
                    attempt_number: 0,
                    time_modified: time,
                }),
                team_submission: None,
            }),
            feedback: None,
        })
    }

    async fn save_submission_online(
        &self,
        _site: &SiteId,
        assign_id: i64,
        upload: &SubmissionUpload,
    ) -> Result<(), WsError> {
        self.check_upload().await?;
        self.saved.write().await.push((assign_id, upload.clone()));
        Ok(())
    }

    async fn submit_for_grading_online(
        &self,
        _site: &SiteId,
        assign_id: i64,
        _accept_statement: bool,
    ) -> Result<(), WsError> {
        self.submitted_for_grading.write().await.push(assign_id);
        Ok(())
    }

    async fn submit_grading_form_online(
        &self,
        _site: &SiteId,
        assign_id: i64,
        user_id: i64,
        form: &GradingFormUpload,
    ) -> Result<(), WsError> {
        self.check_upload().await?;
        self.grading_forms
            .write()
            .await
            .push((assign_id, user_id, form.clone()));
        Ok(())
    }

    async fn get_grade_items(
        &self,
        _site: &SiteId,
        _course_id: i64,
        _cmid: i64,
        _user_id: i64,
    ) -> Result<Vec<GradeItem>, WsError> {
        Ok(Vec::new())
    }

    async fn upload_draft_files(
        &self,
        _site: &SiteId,
        _online_file_ids: &[i64],
        _offline_files: &[PathBuf],
    ) -> Result<i64, WsError> {
        Ok(1234)
    }

    async fn invalidate_content(
        &self,
        _site: &SiteId,
        _cmid: i64,
        _course_id: i64,
    ) -> Result<(), WsError> {
        *self.invalidations.write().await += 1;
        Ok(())
    }
}

pub struct SyncTestContext {
    pub state: AssignSyncState,
    pub site: FakeAssignSite,
    _dir: TempDir,
}

/// Full stack over a file-backed database in a temp dir.
pub async fn setup_sync_state() -> SyncTestContext {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("data").join("offline.db");
    let config = AppConfig::from_lookup(|key| match key {
        "ASSIGN_SYNC_DATABASE_URL" => Some(format!("sqlite:{}?mode=rwc", db_path.display())),
        "ASSIGN_SYNC_DB_MAX_CONNECTIONS" => Some("1".to_string()),
        _ => None,
    });

    let site = FakeAssignSite::new();
    let state = AssignSyncState::initialize(config, Arc::new(site.clone()))
        .await
        .expect("sync state");

    SyncTestContext {
        state,
        site,
        _dir: dir,
    }
}

pub fn site_id(name: &str) -> SiteId {
    SiteId::new(name).expect("site id")
}
