//! Plugin payloads captured with an offline edit.
//!
//! Each plugin contributes one tagged record. Records are validated when they
//! enter the crate, either through [`SubmissionPluginData::new`] or when they
//! are read back from the offline store as JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Text editor content as sent by the editor-based plugins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditorText {
    pub text: String,
    pub format: i32,
    #[serde(default)]
    pub item_id: i64,
}

impl EditorText {
    fn validate(&self, plugin: &str) -> Result<(), String> {
        if !(0..=4).contains(&self.format) {
            return Err(format!("{plugin}: unknown text format {}", self.format));
        }
        if self.item_id < 0 {
            return Err(format!("{plugin}: item id must not be negative"));
        }
        Ok(())
    }
}

/// Files attached through a file area plugin.
///
/// `online_file_ids` reference files that already live on the server,
/// `offline_files` are local copies stored while the device was offline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileAttachments {
    #[serde(default)]
    pub online_file_ids: Vec<i64>,
    #[serde(default)]
    pub offline_files: Vec<PathBuf>,
}

impl FileAttachments {
    pub fn is_empty(&self) -> bool {
        self.online_file_ids.is_empty() && self.offline_files.is_empty()
    }

    fn validate(&self, plugin: &str) -> Result<(), String> {
        if self.online_file_ids.iter().any(|id| *id <= 0) {
            return Err(format!("{plugin}: online file ids must be positive"));
        }
        if self
            .offline_files
            .iter()
            .any(|path| path.as_os_str().is_empty())
        {
            return Err(format!("{plugin}: offline file path cannot be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmissionPlugin {
    OnlineText(EditorText),
    File(FileAttachments),
}

impl SubmissionPlugin {
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionPlugin::OnlineText(_) => "onlinetext",
            SubmissionPlugin::File(_) => "file",
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            SubmissionPlugin::OnlineText(editor) => editor.validate(self.kind()),
            SubmissionPlugin::File(files) => files.validate(self.kind()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedbackPlugin {
    Comments(EditorText),
    File(FileAttachments),
}

impl FeedbackPlugin {
    pub fn kind(&self) -> &'static str {
        match self {
            FeedbackPlugin::Comments(_) => "comments",
            FeedbackPlugin::File(_) => "file",
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            FeedbackPlugin::Comments(editor) => editor.validate(self.kind()),
            FeedbackPlugin::File(files) => files.validate(self.kind()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<SubmissionPlugin>", into = "Vec<SubmissionPlugin>")]
pub struct SubmissionPluginData(Vec<SubmissionPlugin>);

impl SubmissionPluginData {
    pub fn new(plugins: Vec<SubmissionPlugin>) -> Result<Self, String> {
        ensure_unique(plugins.iter().map(SubmissionPlugin::kind))?;
        for plugin in &plugins {
            plugin.validate()?;
        }
        Ok(Self(plugins))
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid submission plugin data: {e}"))
    }

    pub fn plugins(&self) -> &[SubmissionPlugin] {
        &self.0
    }

    pub fn offline_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.0.iter().flat_map(|plugin| match plugin {
            SubmissionPlugin::File(files) => files.offline_files.as_slice(),
            SubmissionPlugin::OnlineText(_) => &[],
        })
    }
}

impl TryFrom<Vec<SubmissionPlugin>> for SubmissionPluginData {
    type Error = String;

    fn try_from(value: Vec<SubmissionPlugin>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubmissionPluginData> for Vec<SubmissionPlugin> {
    fn from(value: SubmissionPluginData) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<FeedbackPlugin>", into = "Vec<FeedbackPlugin>")]
pub struct FeedbackPluginData(Vec<FeedbackPlugin>);

impl FeedbackPluginData {
    pub fn new(plugins: Vec<FeedbackPlugin>) -> Result<Self, String> {
        ensure_unique(plugins.iter().map(FeedbackPlugin::kind))?;
        for plugin in &plugins {
            plugin.validate()?;
        }
        Ok(Self(plugins))
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid feedback plugin data: {e}"))
    }

    pub fn plugins(&self) -> &[FeedbackPlugin] {
        &self.0
    }

    pub fn offline_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.0.iter().flat_map(|plugin| match plugin {
            FeedbackPlugin::File(files) => files.offline_files.as_slice(),
            FeedbackPlugin::Comments(_) => &[],
        })
    }
}

impl TryFrom<Vec<FeedbackPlugin>> for FeedbackPluginData {
    type Error = String;

    fn try_from(value: Vec<FeedbackPlugin>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeedbackPluginData> for Vec<FeedbackPlugin> {
    fn from(value: FeedbackPluginData) -> Self {
        value.0
    }
}

fn ensure_unique<'a>(kinds: impl Iterator<Item = &'a str>) -> Result<(), String> {
    let mut seen = HashSet::new();
    for kind in kinds {
        if !seen.insert(kind) {
            return Err(format!("Plugin {kind} appears more than once"));
        }
    }
    Ok(())
}
