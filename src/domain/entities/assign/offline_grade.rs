use crate::domain::value_objects::FeedbackPluginData;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grade given while offline, waiting to be sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfflineGrade {
    pub assign_id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub grade: Option<f64>,
    pub attempt_number: i64,
    pub add_attempt: bool,
    pub workflow_state: Option<String>,
    pub apply_to_all: bool,
    /// Outcome values keyed by gradebook item number.
    pub outcomes: BTreeMap<i64, f64>,
    pub plugin_data: FeedbackPluginData,
    pub time_modified: i64,
}

impl OfflineGrade {
    pub fn new(assign_id: i64, course_id: i64, user_id: i64, grade: Option<f64>) -> Self {
        Self {
            assign_id,
            course_id,
            user_id,
            grade,
            attempt_number: -1,
            add_attempt: false,
            workflow_state: None,
            apply_to_all: false,
            outcomes: BTreeMap::new(),
            plugin_data: FeedbackPluginData::default(),
            time_modified: Utc::now().timestamp(),
        }
    }

    pub fn with_outcome(mut self, item_number: i64, value: f64) -> Self {
        self.outcomes.insert(item_number, value);
        self
    }

    pub fn with_feedback(mut self, plugin_data: FeedbackPluginData) -> Self {
        self.plugin_data = plugin_data;
        self
    }
}
