//! Work-life balance between work and personal hours.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskCategory};

/// Personal time below this share of work time triggers the "add more" hint.
const LOW_PERSONAL_RATIO: f64 = 0.3;

/// Balance sub-record of a metrics snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkLifeBalance {
    pub work_hours: f64,
    pub personal_hours: f64,
    /// Personal hours as a percentage of work hours, capped at 100
    pub balance_score: f64,
    pub suggestion: String,
}

impl WorkLifeBalance {
    /// Build from caller-supplied hour totals.
    pub fn from_hours(work_hours: f64, personal_hours: f64) -> Self {
        let balance_score = if personal_hours > 0.0 {
            if work_hours > 0.0 {
                (personal_hours / work_hours * 100.0).min(100.0)
            } else {
                100.0
            }
        } else {
            0.0
        };

        let suggestion = if personal_hours < work_hours * LOW_PERSONAL_RATIO {
            "Consider scheduling more personal time to recharge".to_string()
        } else {
            "Good balance between work and personal time".to_string()
        };

        Self {
            work_hours,
            personal_hours,
            balance_score,
            suggestion,
        }
    }

    /// Sum task hours per category; untagged tasks count as work.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let (work, personal) = tasks.iter().fold((0.0, 0.0), |(work, personal), task| {
            match task.effective_category() {
                TaskCategory::Work => (work + task.duration_hours, personal),
                TaskCategory::Personal => (work, personal + task.duration_hours),
            }
        });
        Self::from_hours(work, personal)
    }
}
