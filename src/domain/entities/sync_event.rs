use crate::domain::value_objects::SiteId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AssignSyncEvent {
    /// Emitted by the batch driver for every assignment it updated.
    AutoSynced {
        site_id: SiteId,
        assign_id: i64,
        warnings: Vec<String>,
    },
}

impl AssignSyncEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AssignSyncEvent::AutoSynced { .. } => "addon_mod_assign_autom_synced",
        }
    }
}
