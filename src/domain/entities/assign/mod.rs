pub mod assignment;
pub mod grade_item;
pub mod offline_grade;
pub mod offline_submission;
pub mod submission_status;

pub use assignment::Assignment;
pub use grade_item::GradeItem;
pub use offline_grade::OfflineGrade;
pub use offline_submission::OfflineSubmission;
pub use submission_status::{
    Feedback, FeedbackGrade, LastAttempt, ServerSubmission, SubmissionState, SubmissionStatus,
};
