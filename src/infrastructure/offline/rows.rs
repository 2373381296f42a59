use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct OfflineSubmissionRow {
    pub assign_id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub plugin_data: String,
    pub online_time_modified: i64,
    pub submitted: bool,
    pub submission_statement: bool,
    pub time_created: i64,
    pub time_modified: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct OfflineGradeRow {
    pub assign_id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub grade: Option<f64>,
    pub attempt_number: i64,
    pub add_attempt: bool,
    pub workflow_state: Option<String>,
    pub apply_to_all: bool,
    pub outcomes: String,
    pub plugin_data: String,
    pub time_modified: i64,
}
