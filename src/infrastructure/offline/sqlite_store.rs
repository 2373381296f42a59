use super::mappers::{grade_from_row, submission_from_row};
use super::queries::{
    DELETE_GRADE, DELETE_SUBMISSION, SCHEMA, SELECT_ASSIGN_IDS_WITH_DATA, SELECT_GRADE,
    SELECT_GRADES_BY_ASSIGN, SELECT_HAS_DATA, SELECT_SITES_WITH_DATA, SELECT_SUBMISSION,
    SELECT_SUBMISSIONS_BY_ASSIGN, SELECT_SYNC_TIME, UPSERT_GRADE, UPSERT_SUBMISSION,
    UPSERT_SYNC_TIME,
};
use super::rows::{OfflineGradeRow, OfflineSubmissionRow};
use crate::application::ports::{
    AssignOfflineStore, StoredEdits, SyncStateStore, UnreadableEdit,
};
use crate::domain::entities::{OfflineGrade, OfflineSubmission};
use crate::domain::value_objects::SiteId;
use crate::shared::config::DatabaseConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Executor, SqlitePool};
use tracing::warn;

/// Offline assignment edits and sync timestamps kept in SQLite.
#[derive(Clone)]
pub struct SqliteAssignOfflineStore {
    pool: SqlitePool,
}

impl SqliteAssignOfflineStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        let store = Self::new(pool);
        store.initialize_schema().await?;
        Ok(store)
    }

    pub async fn initialize_schema(&self) -> Result<(), AppError> {
        for statement in SCHEMA {
            self.pool.execute(statement).await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl AssignOfflineStore for SqliteAssignOfflineStore {
    async fn save_submission(
        &self,
        site: &SiteId,
        submission: &OfflineSubmission,
    ) -> Result<(), AppError> {
        let plugin_data = serde_json::to_string(&submission.plugin_data)?;
        sqlx::query(UPSERT_SUBMISSION)
            .bind(site.as_str())
            .bind(submission.assign_id)
            .bind(submission.user_id)
            .bind(submission.course_id)
            .bind(plugin_data)
            .bind(submission.online_time_modified)
            .bind(submission.submitted)
            .bind(submission.submission_statement)
            .bind(submission.time_created)
            .bind(submission.time_modified)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn save_grade(&self, site: &SiteId, grade: &OfflineGrade) -> Result<(), AppError> {
        let outcomes = serde_json::to_string(&grade.outcomes)?;
        let plugin_data = serde_json::to_string(&grade.plugin_data)?;
        sqlx::query(UPSERT_GRADE)
            .bind(site.as_str())
            .bind(grade.assign_id)
            .bind(grade.user_id)
            .bind(grade.course_id)
            .bind(grade.grade)
            .bind(grade.attempt_number)
            .bind(grade.add_attempt)
            .bind(&grade.workflow_state)
            .bind(grade.apply_to_all)
            .bind(outcomes)
            .bind(plugin_data)
            .bind(grade.time_modified)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_submission(
        &self,
        site: &SiteId,
        assign_id: i64,
        user_id: i64,
    ) -> Result<Option<OfflineSubmission>, AppError> {
        let row = sqlx::query_as::<_, OfflineSubmissionRow>(SELECT_SUBMISSION)
            .bind(site.as_str())
            .bind(assign_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(submission_from_row).transpose()
    }

    async fn get_grade(
        &self,
        site: &SiteId,
        assign_id: i64,
        user_id: i64,
    ) -> Result<Option<OfflineGrade>, AppError> {
        let row = sqlx::query_as::<_, OfflineGradeRow>(SELECT_GRADE)
            .bind(site.as_str())
            .bind(assign_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(grade_from_row).transpose()
    }

    async fn get_submissions(
        &self,
        site: &SiteId,
        assign_id: i64,
    ) -> Result<StoredEdits<OfflineSubmission>, AppError> {
        let rows = sqlx::query_as::<_, OfflineSubmissionRow>(SELECT_SUBMISSIONS_BY_ASSIGN)
            .bind(site.as_str())
            .bind(assign_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(decode_rows(
            rows,
            |row: &OfflineSubmissionRow| (row.user_id, row.course_id),
            submission_from_row,
            site,
            assign_id,
        ))
    }

    async fn get_grades(
        &self,
        site: &SiteId,
        assign_id: i64,
    ) -> Result<StoredEdits<OfflineGrade>, AppError> {
        let rows = sqlx::query_as::<_, OfflineGradeRow>(SELECT_GRADES_BY_ASSIGN)
            .bind(site.as_str())
            .bind(assign_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(decode_rows(
            rows,
            |row: &OfflineGradeRow| (row.user_id, row.course_id),
            grade_from_row,
            site,
            assign_id,
        ))
    }

    async fn delete_submission(
        &self,
        site: &SiteId,
        assign_id: i64,
        user_id: i64,
    ) -> Result<(), AppError> {
        sqlx::query(DELETE_SUBMISSION)
            .bind(site.as_str())
            .bind(assign_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_grade(
        &self,
        site: &SiteId,
        assign_id: i64,
        user_id: i64,
    ) -> Result<(), AppError> {
        sqlx::query(DELETE_GRADE)
            .bind(site.as_str())
            .bind(assign_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_assign_ids_with_data(&self, site: &SiteId) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(SELECT_ASSIGN_IDS_WITH_DATA)
            .bind(site.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn list_sites_with_data(&self) -> Result<Vec<SiteId>, AppError> {
        let sites = sqlx::query_scalar::<_, String>(SELECT_SITES_WITH_DATA)
            .fetch_all(&self.pool)
            .await?;

        sites
            .into_iter()
            .map(|site| SiteId::new(site).map_err(AppError::ValidationError))
            .collect()
    }

    async fn has_data(&self, site: &SiteId, assign_id: i64) -> Result<bool, AppError> {
        let has_data = sqlx::query_scalar::<_, i64>(SELECT_HAS_DATA)
            .bind(site.as_str())
            .bind(assign_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(has_data != 0)
    }
}

/// Maps rows one by one so a single bad row does not hide the others.
fn decode_rows<R, T>(
    rows: Vec<R>,
    owner_of: impl Fn(&R) -> (i64, i64),
    decode: impl Fn(R) -> Result<T, AppError>,
    site: &SiteId,
    assign_id: i64,
) -> StoredEdits<T> {
    let mut stored = StoredEdits::default();
    for row in rows {
        let (user_id, course_id) = owner_of(&row);
        match decode(row) {
            Ok(edit) => stored.edits.push(edit),
            Err(err) => {
                warn!(assign_id, user_id, site = %site, error = %err, "unreadable offline edit");
                stored.unreadable.push(UnreadableEdit {
                    user_id,
                    course_id,
                    reason: err.to_string(),
                });
            }
        }
    }
    stored
}

#[async_trait]
impl SyncStateStore for SqliteAssignOfflineStore {
    async fn get_sync_time(
        &self,
        site: &SiteId,
        component: &str,
        id: i64,
    ) -> Result<Option<i64>, AppError> {
        let time = sqlx::query_scalar::<_, i64>(SELECT_SYNC_TIME)
            .bind(site.as_str())
            .bind(component)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(time)
    }

    async fn set_sync_time(
        &self,
        site: &SiteId,
        component: &str,
        id: i64,
        time: i64,
    ) -> Result<(), AppError> {
        sqlx::query(UPSERT_SYNC_TIME)
            .bind(site.as_str())
            .bind(component)
            .bind(id)
            .bind(time)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{
        EditorText, FileAttachments, SubmissionPlugin, SubmissionPluginData,
    };
    use std::path::PathBuf;

    async fn setup_store() -> SqliteAssignOfflineStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = SqliteAssignOfflineStore::new(pool);
        store.initialize_schema().await.unwrap();
        store
    }

    fn site(name: &str) -> SiteId {
        SiteId::new(name).unwrap()
    }

    fn submission(assign_id: i64, user_id: i64) -> OfflineSubmission {
        let plugin_data = SubmissionPluginData::new(vec![
            SubmissionPlugin::OnlineText(EditorText {
                text: "<p>Answer</p>".into(),
                format: 1,
                item_id: 0,
            }),
            SubmissionPlugin::File(FileAttachments {
                online_file_ids: vec![11],
                offline_files: vec![PathBuf::from("/tmp/offline/answer.pdf")],
            }),
        ])
        .unwrap();
        OfflineSubmission::new(assign_id, 5, user_id, plugin_data, 1_700_000_000)
    }

    #[tokio::test]
    async fn submission_round_trips_through_sqlite() {
        let store = setup_store().await;
        let saved = submission(3, 42).mark_submitted(true);

        store.save_submission(&site("a"), &saved).await.unwrap();
        let loaded = store.get_submission(&site("a"), 3, 42).await.unwrap();

        assert_eq!(loaded, Some(saved));
    }

    #[tokio::test]
    async fn saving_twice_replaces_the_edit() {
        let store = setup_store().await;
        let mut edit = submission(3, 42);
        store.save_submission(&site("a"), &edit).await.unwrap();
        edit.online_time_modified = 1_800_000_000;
        store.save_submission(&site("a"), &edit).await.unwrap();

        let all = store.get_submissions(&site("a"), 3).await.unwrap();
        assert_eq!(all.edits.len(), 1);
        assert_eq!(all.edits[0].online_time_modified, 1_800_000_000);
    }

    #[tokio::test]
    async fn grade_outcomes_survive_storage() {
        let store = setup_store().await;
        let grade = OfflineGrade::new(3, 5, 42, Some(65.5)).with_outcome(1000, 2.0);

        store.save_grade(&site("a"), &grade).await.unwrap();
        let loaded = store.get_grade(&site("a"), 3, 42).await.unwrap().unwrap();

        assert_eq!(loaded.outcomes.get(&1000), Some(&2.0));
        assert_eq!(loaded.grade, Some(65.5));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = setup_store().await;
        store.save_submission(&site("a"), &submission(3, 42)).await.unwrap();

        store.delete_submission(&site("a"), 3, 42).await.unwrap();
        store.delete_submission(&site("a"), 3, 42).await.unwrap();
        store.delete_grade(&site("a"), 3, 42).await.unwrap();

        assert!(!store.has_data(&site("a"), 3).await.unwrap());
    }

    #[tokio::test]
    async fn lists_assignments_and_sites_with_data() {
        let store = setup_store().await;
        store.save_submission(&site("a"), &submission(3, 1)).await.unwrap();
        store
            .save_grade(&site("a"), &OfflineGrade::new(9, 5, 1, Some(1.0)))
            .await
            .unwrap();
        store
            .save_grade(&site("b"), &OfflineGrade::new(3, 5, 1, Some(1.0)))
            .await
            .unwrap();

        assert_eq!(store.list_assign_ids_with_data(&site("a")).await.unwrap(), vec![3, 9]);
        assert_eq!(
            store.list_sites_with_data().await.unwrap(),
            vec![site("a"), site("b")]
        );
        assert!(store.has_data(&site("b"), 3).await.unwrap());
        assert!(!store.has_data(&site("b"), 9).await.unwrap());
    }

    #[tokio::test]
    async fn sync_time_is_scoped_by_site_and_component() {
        let store = setup_store().await;
        store
            .set_sync_time(&site("a"), "mmaModAssign", 3, 100)
            .await
            .unwrap();
        store
            .set_sync_time(&site("a"), "mmaModAssign", 3, 200)
            .await
            .unwrap();

        assert_eq!(
            store.get_sync_time(&site("a"), "mmaModAssign", 3).await.unwrap(),
            Some(200)
        );
        assert_eq!(
            store.get_sync_time(&site("b"), "mmaModAssign", 3).await.unwrap(),
            None
        );
        assert_eq!(
            store.get_sync_time(&site("a"), "other", 3).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn unreadable_row_does_not_hide_the_others() {
        let store = setup_store().await;
        store.save_submission(&site("a"), &submission(3, 42)).await.unwrap();
        store.save_submission(&site("a"), &submission(3, 99)).await.unwrap();
        sqlx::query(
            "UPDATE assign_offline_submissions SET plugin_data = ?1 WHERE user_id = ?2",
        )
        .bind(r#"[{"type":"bogus"}]"#)
        .bind(99_i64)
        .execute(store.pool())
        .await
        .unwrap();

        let stored = store.get_submissions(&site("a"), 3).await.unwrap();

        assert_eq!(stored.edits.len(), 1);
        assert_eq!(stored.edits[0].user_id, 42);
        assert_eq!(stored.unreadable.len(), 1);
        assert_eq!(stored.unreadable[0].user_id, 99);
        assert!(stored.unreadable[0].reason.contains("bogus"));
    }
}
