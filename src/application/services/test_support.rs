//! Mock collaborators shared by the service tests.

use crate::application::ports::{
    AssignOfflineStore, AssignWebService, GradingFormUpload, StoredEdits, SubmissionUpload,
    SyncStateStore, WsError,
};
use crate::domain::entities::{
    Assignment, GradeItem, OfflineGrade, OfflineSubmission, SubmissionStatus,
};
use crate::domain::value_objects::SiteId;
use crate::shared::error::AppError;
use async_trait::async_trait;
use mockall::mock;
use std::path::PathBuf;

mock! {
    pub WebService {}

    #[async_trait]
    impl AssignWebService for WebService {
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
}

mock! {
    pub OfflineStore {}

    #[async_trait]
    impl AssignOfflineStore for OfflineStore {
        async fn save_submission(&self, site: &SiteId, submission: &OfflineSubmission) -> Result<(), AppError>;
        async fn save_grade(&self, site: &SiteId, grade: &OfflineGrade) -> Result<(), AppError>;
        async fn get_submission(&self, site: &SiteId, assign_id: i64, user_id: i64) -> Result<Option<OfflineSubmission>, AppError>;
        async fn get_grade(&self, site: &SiteId, assign_id: i64, user_id: i64) -> Result<Option<OfflineGrade>, AppError>;
        async fn get_submissions(&self, site: &SiteId, assign_id: i64) -> Result<StoredEdits<OfflineSubmission>, AppError>;
        async fn get_grades(&self, site: &SiteId, assign_id: i64) -> Result<StoredEdits<OfflineGrade>, AppError>;
        async fn delete_submission(&self, site: &SiteId, assign_id: i64, user_id: i64) -> Result<(), AppError>;
        async fn delete_grade(&self, site: &SiteId, assign_id: i64, user_id: i64) -> Result<(), AppError>;
        async fn list_assign_ids_with_data(&self, site: &SiteId) -> Result<Vec<i64>, AppError>;
        async fn list_sites_with_data(&self) -> Result<Vec<SiteId>, AppError>;
        async fn has_data(&self, site: &SiteId, assign_id: i64) -> Result<bool, AppError>;
    }
}

mock! {
    pub SyncTimes {}

    #[async_trait]
    impl SyncStateStore for SyncTimes {
        async fn get_sync_time(&self, site: &SiteId, component: &str, id: i64) -> Result<Option<i64>, AppError>;
        async fn set_sync_time(&self, site: &SiteId, component: &str, id: i64, time: i64) -> Result<(), AppError>;
    }
}
