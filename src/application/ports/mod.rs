pub mod assign_offline_store;
pub mod assign_web_service;
pub mod sync_guards;

pub use assign_offline_store::{AssignOfflineStore, StoredEdits, SyncStateStore, UnreadableEdit};
pub use assign_web_service::{AssignWebService, GradingFormUpload, SubmissionUpload, WsError};
pub use sync_guards::{NetworkStatus, SyncBlocker, SyncEventPublisher, Translator};
