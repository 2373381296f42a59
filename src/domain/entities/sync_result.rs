use serde::{Deserialize, Serialize};

/// Outcome of one sync attempt for an assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AssignSyncResult {
    pub warnings: Vec<String>,
    pub updated: bool,
}

impl AssignSyncResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning unless the exact same text is already present.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    pub fn merge(&mut self, other: AssignSyncResult) {
        self.updated |= other.updated;
        for warning in other.warnings {
            self.add_warning(warning);
        }
    }
}

/// Counts produced by one pass of the batch driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BatchSyncSummary {
    pub synced_count: u32,
    pub skipped_count: u32,
    pub failed_count: u32,
}

impl BatchSyncSummary {
    pub fn total(&self) -> u32 {
        self.synced_count + self.skipped_count + self.failed_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_are_deduplicated() {
        let mut result = AssignSyncResult::new();
        result.add_warning("deleted");
        result.add_warning("deleted");
        result.add_warning("other");

        assert_eq!(result.warnings, vec!["deleted", "other"]);
    }

    #[test]
    fn merge_keeps_updated_flag() {
        let mut result = AssignSyncResult::new();
        result.merge(AssignSyncResult {
            warnings: vec!["a".into()],
            updated: true,
        });
        result.merge(AssignSyncResult {
            warnings: vec!["a".into()],
            updated: false,
        });

        assert!(result.updated);
        assert_eq!(result.warnings.len(), 1);
    }
}
