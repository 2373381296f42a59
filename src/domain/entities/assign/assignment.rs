use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: i64,
    pub cmid: i64,
    pub course_id: i64,
    pub name: String,
    pub submission_drafts: bool,
    pub team_submission: bool,
    /// Negative values reference a scale instead of a point grade.
    pub max_grade: Option<f64>,
}

impl Assignment {
    pub fn uses_scale(&self) -> bool {
        self.max_grade.is_some_and(|grade| grade < 0.0)
    }
}
