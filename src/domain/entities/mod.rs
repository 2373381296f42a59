pub mod assign;
pub mod sync_event;
pub mod sync_result;

pub use assign::{
    Assignment, GradeItem, OfflineGrade, OfflineSubmission, SubmissionState, SubmissionStatus,
};
pub use sync_event::AssignSyncEvent;
pub use sync_result::{AssignSyncResult, BatchSyncSummary};
