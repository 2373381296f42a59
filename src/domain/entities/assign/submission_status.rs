use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    New,
    Draft,
    Submitted,
    Reopened,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSubmission {
    pub id: i64,
    pub user_id: i64,
    pub status: SubmissionState,
    pub attempt_number: i64,
    pub time_modified: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LastAttempt {
    pub submission: Option<ServerSubmission>,
    pub team_submission: Option<ServerSubmission>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackGrade {
    pub grade: Option<f64>,
    pub time_modified: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Feedback {
    pub graded_date: Option<i64>,
    pub grade: Option<FeedbackGrade>,
}

/// Server view of a user's submission, as returned by the status call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SubmissionStatus {
    pub last_attempt: Option<LastAttempt>,
    pub feedback: Option<Feedback>,
}

impl SubmissionStatus {
    /// Submission the offline edit was made against: the group submission for
    /// team assignments, the user's own submission otherwise.
    pub fn submission_for(&self, team_submission: bool) -> Option<&ServerSubmission> {
        let attempt = self.last_attempt.as_ref()?;
        if team_submission {
            attempt.team_submission.as_ref()
        } else {
            attempt.submission.as_ref()
        }
    }

    pub fn submission_time_modified(&self, team_submission: bool) -> i64 {
        self.submission_for(team_submission)
            .map(|submission| submission.time_modified)
            .unwrap_or(0)
    }

    pub fn feedback_time_modified(&self) -> i64 {
        let Some(feedback) = self.feedback.as_ref() else {
            return 0;
        };
        feedback
            .graded_date
            .filter(|date| *date > 0)
            .or_else(|| feedback.grade.as_ref().map(|grade| grade.time_modified))
            .unwrap_or(0)
    }
}
