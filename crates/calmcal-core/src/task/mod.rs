//! Task model for calendar scheduling.
//!
//! A [`Task`] is one scheduled unit of work with a concrete start instant and
//! a duration in hours. Recurrence is metadata only; a recurring task is never
//! expanded into several instances here.

pub mod stress;
pub mod subtask_templates;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use stress::{classify, StressBand, StressClassifier};
pub use subtask_templates::{infer_category, SubtaskCatalog, SubtaskTemplate, PERSONAL_EVENT_TYPES};

/// Coarse urgency label attached to a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl Default for StressLevel {
    fn default() -> Self {
        StressLevel::Low
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StressLevel::Low => "low",
            StressLevel::Medium => "medium",
            StressLevel::High => "high",
        })
    }
}

/// Priority chosen by the user when creating an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// How often a recurring task repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(format!("unknown recurrence: {other}")),
        }
    }
}

/// Recurrence metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Work/personal split used for balance metrics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Work,
    Personal,
}

impl FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(TaskCategory::Work),
            "personal" => Ok(TaskCategory::Personal),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// A scheduled unit of work.
///
/// Serialized with the field names the presentation layer and the metrics
/// service exchange (`date`, `duration`, `dueDate`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, stable for the task's lifetime
    pub id: String,
    /// Display title
    pub title: String,
    /// Start instant
    #[serde(rename = "date")]
    pub start: DateTime<Utc>,
    /// Duration in hours
    #[serde(rename = "duration")]
    pub duration_hours: f64,
    /// Stress tier, set once from priority at creation
    pub stress: StressLevel,
    /// Category tag used for display and templating
    #[serde(rename = "type")]
    pub task_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    /// Originating event, for auto-generated subtasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
}

impl Task {
    /// Create a task with a fresh id.
    pub fn new(
        title: impl Into<String>,
        task_type: impl Into<String>,
        start: DateTime<Utc>,
        duration_hours: f64,
        stress: StressLevel,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            start,
            duration_hours,
            stress,
            task_type: task_type.into(),
            due_date: None,
            recurrence: None,
            parent_task_id: None,
            parent_task_title: None,
            category: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    pub fn with_parent(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.parent_task_id = Some(id.into());
        self.parent_task_title = Some(title.into());
        self
    }

    /// Effective end: `start + duration_hours`.
    pub fn end(&self) -> DateTime<Utc> {
        shift_by_hours(self.start, self.duration_hours)
    }

    /// Calendar day the task starts on.
    pub fn day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Explicit reclassification; the only way stress changes after creation.
    pub fn reclassify(&mut self, stress: StressLevel) {
        self.stress = stress;
    }

    /// Whether `[start, start + duration_hours)` conflicts with this task.
    ///
    /// Only intervals on the same calendar day conflict; touching endpoints
    /// do not.
    pub fn conflicts_with(&self, start: DateTime<Utc>, duration_hours: f64) -> bool {
        let end = shift_by_hours(start, duration_hours);
        start.date_naive() == self.day() && start < self.end() && end > self.start
    }

    /// Fractional days from `now` until the due date.
    pub fn days_until_due(&self, now: DateTime<Utc>) -> Option<f64> {
        self.due_date
            .map(|due| (due - now).num_milliseconds() as f64 / MILLIS_PER_DAY)
    }

    /// Whether the duration is a positive, finite number of hours.
    pub fn has_valid_duration(&self) -> bool {
        self.duration_hours.is_finite() && self.duration_hours > 0.0
    }

    /// Category used for balance metrics; untagged tasks count as work.
    pub fn effective_category(&self) -> TaskCategory {
        self.category.unwrap_or(TaskCategory::Work)
    }
}

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;
const MAX_SHIFT_HOURS: f64 = 1.0e12;

/// Convert fractional hours to a chrono duration (millisecond precision).
pub fn hours(value: f64) -> Duration {
    let value = value.clamp(-MAX_SHIFT_HOURS, MAX_SHIFT_HOURS);
    Duration::milliseconds((value * 3_600_000.0).round() as i64)
}

/// `start + hours(value)`, saturating at the ends of the representable range.
pub fn shift_by_hours(start: DateTime<Utc>, value: f64) -> DateTime<Utc> {
    start.checked_add_signed(hours(value)).unwrap_or(if value < 0.0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Whether two tasks conflict (same day, overlapping intervals).
pub fn tasks_conflict(a: &Task, b: &Task) -> bool {
    a.id != b.id && a.conflicts_with(b.start, b.duration_hours)
}

/// Pairs of task ids that currently conflict.
///
/// Conflicts are tolerated (manual moves may create them); this only reports.
pub fn find_conflicts(tasks: &[Task]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (i, a) in tasks.iter().enumerate() {
        for b in &tasks[i + 1..] {
            if tasks_conflict(a, b) {
                pairs.push((a.id.clone(), b.id.clone()));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn end_adds_fractional_hours() {
        let task = Task::new("Draft", "Assignment", at(17, 10, 0), 1.5, StressLevel::Medium);
        assert_eq!(task.end(), at(17, 11, 30));
    }

    #[test]
    fn huge_durations_saturate_instead_of_overflowing() {
        let task = Task::new("Huge", "Study", at(17, 9, 0), 1e10, StressLevel::Low);
        assert_eq!(task.end(), DateTime::<Utc>::MAX_UTC);
        assert!(task.conflicts_with(at(17, 12, 0), 1.0));
        assert!(task.has_valid_duration());

        let backwards = Task::new("Back", "Study", at(17, 9, 0), -1e12, StressLevel::Low);
        assert!(!backwards.has_valid_duration());
        assert!(!backwards.conflicts_with(at(17, 12, 0), 1.0));
        assert_eq!(shift_by_hours(at(17, 9, 0), f64::NAN), at(17, 9, 0));
    }

    #[test]
    fn touching_intervals_do_not_conflict() {
        let task = Task::new("A", "Study", at(17, 10, 0), 2.0, StressLevel::Low);
        assert!(!task.conflicts_with(at(17, 12, 0), 1.0));
        assert!(!task.conflicts_with(at(17, 9, 0), 1.0));
        assert!(task.conflicts_with(at(17, 11, 0), 1.0));
        assert!(task.conflicts_with(at(17, 9, 30), 1.0));
    }

    #[test]
    fn different_days_never_conflict() {
        let task = Task::new("Late", "Study", at(17, 20, 0), 6.0, StressLevel::Low);
        // Overlaps in absolute time but starts on the next day
        assert!(!task.conflicts_with(at(18, 0, 0), 1.0));
    }

    #[test]
    fn find_conflicts_reports_pairs() {
        let a = Task::new("A", "Study", at(17, 10, 0), 2.0, StressLevel::Low).with_id("a");
        let b = Task::new("B", "Study", at(17, 11, 0), 1.0, StressLevel::Low).with_id("b");
        let c = Task::new("C", "Study", at(17, 12, 0), 1.0, StressLevel::Low).with_id("c");

        let conflicts = find_conflicts(&[a, b, c]);
        assert_eq!(conflicts, vec![("a".to_string(), "b".to_string())]);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let task = Task::new("Essay", "Assignment", at(18, 9, 0), 2.0, StressLevel::High)
            .with_id("t-1")
            .with_due_date(at(20, 23, 59))
            .with_category(TaskCategory::Work);

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["date"], "2025-11-18T09:00:00Z");
        assert_eq!(json["duration"], 2.0);
        assert_eq!(json["type"], "Assignment");
        assert_eq!(json["stress"], "high");
        assert_eq!(json["dueDate"], "2025-11-20T23:59:00Z");
        assert!(json.get("recurrence").is_none());

        let decoded: Task = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn days_until_due_is_fractional() {
        let task = Task::new("A", "Exam", at(17, 10, 0), 1.0, StressLevel::High)
            .with_due_date(at(18, 22, 0));
        let days = task.days_until_due(at(17, 10, 0)).unwrap();
        assert!((days - 1.5).abs() < 1e-9);
    }

    #[test]
    fn parse_priority_and_category() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!("personal".parse::<TaskCategory>().unwrap(), TaskCategory::Personal);
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
    }
}
