pub mod entities;
pub mod value_objects;

pub use entities::{AssignSyncEvent, AssignSyncResult, Assignment, OfflineGrade, OfflineSubmission};
pub use value_objects::SiteId;
