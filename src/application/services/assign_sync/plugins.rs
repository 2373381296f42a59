use crate::application::ports::{
    AssignWebService, GradingFormUpload, SubmissionUpload, WsError,
};
use crate::domain::entities::OfflineGrade;
use crate::domain::value_objects::{
    FeedbackPlugin, FileAttachments, SiteId, SubmissionPlugin, SubmissionPluginData,
};
use std::path::PathBuf;
use tracing::debug;

/// Turns offline submission plugin records into the upload the server expects.
pub async fn prepare_submission_upload(
    web: &dyn AssignWebService,
    site: &SiteId,
    plugin_data: &SubmissionPluginData,
) -> Result<SubmissionUpload, WsError> {
    let mut upload = SubmissionUpload::default();

    for plugin in plugin_data.plugins() {
        match plugin {
            SubmissionPlugin::OnlineText(editor) => {
                upload.online_text = Some(editor.clone());
            }
            SubmissionPlugin::File(files) => {
                upload.files_item_id = Some(upload_attachments(web, site, files).await?);
            }
        }
    }

    Ok(upload)
}

pub async fn prepare_grading_form(
    web: &dyn AssignWebService,
    site: &SiteId,
    grade: &OfflineGrade,
) -> Result<GradingFormUpload, WsError> {
    let mut form = GradingFormUpload {
        grade: grade.grade,
        attempt_number: grade.attempt_number,
        add_attempt: grade.add_attempt,
        workflow_state: grade.workflow_state.clone(),
        apply_to_all: grade.apply_to_all,
        outcomes: grade.outcomes.clone(),
        feedback_comments: None,
        feedback_files_item_id: None,
    };

    for plugin in grade.plugin_data.plugins() {
        match plugin {
            FeedbackPlugin::Comments(editor) => {
                form.feedback_comments = Some(editor.clone());
            }
            FeedbackPlugin::File(files) => {
                form.feedback_files_item_id = Some(upload_attachments(web, site, files).await?);
            }
        }
    }

    Ok(form)
}

/// An empty attachment list maps to draft item 0, which clears the file area.
async fn upload_attachments(
    web: &dyn AssignWebService,
    site: &SiteId,
    files: &FileAttachments,
) -> Result<i64, WsError> {
    if files.is_empty() {
        return Ok(0);
    }
    web.upload_draft_files(site, &files.online_file_ids, &files.offline_files)
        .await
}

/// Best effort; a file that is already gone is fine.
pub async fn remove_offline_files<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) {
    for path in paths {
        if let Err(err) = tokio::fs::remove_file(path).await {
            debug!(path = %path.display(), error = %err, "could not remove offline file");
        }
    }
}
