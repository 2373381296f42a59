use crate::domain::entities::{OfflineGrade, OfflineSubmission};
use crate::domain::value_objects::SiteId;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Offline edits of one assignment as read back from storage.
///
/// Rows that no longer decode are reported in `unreadable` instead of failing
/// the whole read; they stay stored until the caller deletes them.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEdits<T> {
    pub edits: Vec<T>,
    pub unreadable: Vec<UnreadableEdit>,
}

impl<T> StoredEdits<T> {
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty() && self.unreadable.is_empty()
    }
}

impl<T> Default for StoredEdits<T> {
    fn default() -> Self {
        Self {
            edits: Vec::new(),
            unreadable: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableEdit {
    pub user_id: i64,
    pub course_id: i64,
    pub reason: String,
}

#[async_trait]
pub trait AssignOfflineStore: Send + Sync {
    async fn save_submission(
        &self,
        site: &SiteId,
        submission: &OfflineSubmission,
    ) -> Result<(), AppError>;
    async fn save_grade(&self, site: &SiteId, grade: &OfflineGrade) -> Result<(), AppError>;
    async fn get_submission(
        &self,
        site: &SiteId,
        assign_id: i64,
        user_id: i64,
    ) -> Result<Option<OfflineSubmission>, AppError>;
    async fn get_grade(
        &self,
        site: &SiteId,
        assign_id: i64,
        user_id: i64,
    ) -> Result<Option<OfflineGrade>, AppError>;
    async fn get_submissions(
        &self,
        site: &SiteId,
        assign_id: i64,
    ) -> Result<StoredEdits<OfflineSubmission>, AppError>;
    async fn get_grades(
        &self,
        site: &SiteId,
        assign_id: i64,
    ) -> Result<StoredEdits<OfflineGrade>, AppError>;
    /// Deleting a missing row is not an error.
    async fn delete_submission(
        &self,
        site: &SiteId,
        assign_id: i64,
        user_id: i64,
    ) -> Result<(), AppError>;
    async fn delete_grade(&self, site: &SiteId, assign_id: i64, user_id: i64)
    -> Result<(), AppError>;
    async fn list_assign_ids_with_data(&self, site: &SiteId) -> Result<Vec<i64>, AppError>;
    async fn list_sites_with_data(&self) -> Result<Vec<SiteId>, AppError>;
    async fn has_data(&self, site: &SiteId, assign_id: i64) -> Result<bool, AppError>;
}

/// Last successful sync time per component and entity.
#[async_trait]
pub trait SyncStateStore: Send + Sync {
    async fn get_sync_time(
        &self,
        site: &SiteId,
        component: &str,
        id: i64,
    ) -> Result<Option<i64>, AppError>;
    async fn set_sync_time(
        &self,
        site: &SiteId,
        component: &str,
        id: i64,
        time: i64,
    ) -> Result<(), AppError>;
}
