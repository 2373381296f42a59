use super::OfflineGrade;
use serde::{Deserialize, Serialize};

/// Gradebook entry for one course module and user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GradeItem {
    pub item_number: i64,
    pub outcome_id: Option<i64>,
    pub scale_id: Option<i64>,
    pub grade_raw: Option<f64>,
    pub grade_formatted: Option<String>,
    pub date_graded: Option<i64>,
    pub date_submitted: Option<i64>,
}

impl GradeItem {
    pub fn last_change(&self) -> i64 {
        self.date_graded
            .filter(|date| *date > 0)
            .or(self.date_submitted)
            .unwrap_or(0)
    }

    fn grade_value(&self) -> Option<f64> {
        if self.scale_id.is_some() {
            return self.grade_raw;
        }
        self.grade_formatted
            .as_deref()
            .and_then(|formatted| formatted.trim().parse::<f64>().ok())
            .or(self.grade_raw)
    }
}

impl OfflineGrade {
    /// Replaces offline values with gradebook values changed after the edit.
    ///
    /// Returns true when at least one value was overridden.
    pub fn merge_gradebook(&mut self, items: &[GradeItem]) -> bool {
        let mut changed = false;

        for item in items {
            if item.last_change() <= self.time_modified {
                continue;
            }

            if item.outcome_id.is_some() {
                if let (Some(value), Some(slot)) =
                    (item.grade_raw, self.outcomes.get_mut(&item.item_number))
                {
                    *slot = value;
                    changed = true;
                }
                continue;
            }

            if let Some(value) = item.grade_value() {
                self.grade = Some(value);
                changed = true;
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_grade(time_modified: i64) -> OfflineGrade {
        let mut grade = OfflineGrade::new(3, 9, 42, Some(55.0)).with_outcome(1000, 1.0);
        grade.time_modified = time_modified;
        grade
    }

    #[test]
    fn newer_gradebook_grade_wins() {
        let mut grade = offline_grade(100);
        let changed = grade.merge_gradebook(&[GradeItem {
            item_number: 0,
            grade_formatted: Some("80.00".into()),
            grade_raw: Some(80.0),
            date_graded: Some(150),
            ..GradeItem::default()
        }]);

        assert!(changed);
        assert_eq!(grade.grade, Some(80.0));
    }

    #[test]
    fn older_gradebook_entries_are_ignored() {
        let mut grade = offline_grade(100);
        let changed = grade.merge_gradebook(&[GradeItem {
            item_number: 0,
            grade_raw: Some(10.0),
            date_graded: Some(100),
            ..GradeItem::default()
        }]);

        assert!(!changed);
        assert_eq!(grade.grade, Some(55.0));
    }

    #[test]
    fn scale_items_use_raw_value() {
        let mut grade = offline_grade(100);
        grade.merge_gradebook(&[GradeItem {
            item_number: 0,
            scale_id: Some(2),
            grade_raw: Some(3.0),
            grade_formatted: Some("Competent".into()),
            date_graded: Some(200),
            ..GradeItem::default()
        }]);

        assert_eq!(grade.grade, Some(3.0));
    }

    #[test]
    fn outcomes_only_override_edited_items() {
        let mut grade = offline_grade(100);
        grade.merge_gradebook(&[
            GradeItem {
                item_number: 1000,
                outcome_id: Some(5),
                grade_raw: Some(2.0),
                date_graded: Some(300),
                ..GradeItem::default()
            },
            GradeItem {
                item_number: 1001,
                outcome_id: Some(6),
                grade_raw: Some(4.0),
                date_graded: Some(300),
                ..GradeItem::default()
            },
        ]);

        assert_eq!(grade.outcomes.get(&1000), Some(&2.0));
        assert!(!grade.outcomes.contains_key(&1001));
        assert_eq!(grade.grade, Some(55.0));
    }

    #[test]
    fn submitted_date_is_used_when_never_graded() {
        let item = GradeItem {
            date_graded: Some(0),
            date_submitted: Some(77),
            ..GradeItem::default()
        };
        assert_eq!(item.last_change(), 77);
    }
}
