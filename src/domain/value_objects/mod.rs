pub mod plugin_data;
pub mod site_id;

pub use plugin_data::{
    EditorText, FeedbackPlugin, FeedbackPluginData, FileAttachments, SubmissionPlugin,
    SubmissionPluginData,
};
pub use site_id::SiteId;
