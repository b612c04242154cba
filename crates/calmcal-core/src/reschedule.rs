//! Bulk rescheduling and single-task moves.
//!
//! Rescheduling replaces only the calendar date of each selected task and
//! keeps its time of day. Previews and deadline notices are advisory: they
//! never block the change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError, ValidationErrors};
use crate::preferences::Preferences;
use crate::task::{tasks_conflict, StressLevel, Task};

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Kind of advisory warning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    Conflict,
    Deadline,
    Overload,
    OptimalTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Advisory warning shown before a reschedule is committed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub severity: Severity,
    pub message: String,
    pub affected_tasks: Vec<String>,
}

/// Notice raised when a moved task now starts after its due date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineNotice {
    pub task_id: String,
    pub task_title: String,
    pub new_start: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub message: String,
}

/// Reschedule engine
#[derive(Debug, Clone)]
pub struct RescheduleEngine {
    /// Tasks due within this many whole days get a deadline warning
    pub deadline_warning_days: i64,
    /// Target day above `preferred hours * overload_factor` is flagged
    pub overload_factor: f64,
}

impl Default for RescheduleEngine {
    fn default() -> Self {
        Self {
            deadline_warning_days: 2,
            overload_factor: 1.3,
        }
    }
}

impl RescheduleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the task list with the selected tasks moved to `new_date`.
    pub fn reschedule(&self, tasks: &[Task], task_ids: &[String], new_date: NaiveDate) -> Vec<Task> {
        let mut updated = tasks.to_vec();
        self.apply(&mut updated, task_ids, new_date);
        updated
    }

    /// Move the selected tasks to `new_date` in place, keeping time of day.
    ///
    /// Returns the ids that were found and moved; unknown ids are ignored.
    pub fn apply(&self, tasks: &mut [Task], task_ids: &[String], new_date: NaiveDate) -> Vec<String> {
        let mut moved = Vec::new();
        for task in tasks.iter_mut().filter(|t| task_ids.contains(&t.id)) {
            task.start = on_date(task.start, new_date);
            moved.push(task.id.clone());
        }
        tracing::info!(count = moved.len(), %new_date, "rescheduled tasks");
        moved
    }

    /// Warnings for the selected tasks: near deadlines and high-stress tasks.
    pub fn preview_warnings(
        &self,
        tasks: &[Task],
        task_ids: &[String],
        now: DateTime<Utc>,
    ) -> Vec<RescheduleWarning> {
        let mut warnings = Vec::new();

        for id in task_ids {
            let Some(task) = tasks.iter().find(|t| &t.id == id) else {
                continue;
            };

            if let Some(due) = task.due_date {
                let days = whole_days_until(due, now);
                if days <= self.deadline_warning_days {
                    warnings.push(RescheduleWarning {
                        kind: WarningKind::Deadline,
                        severity: Severity::High,
                        message: format!("{} is due in {} days", task.title, days),
                        affected_tasks: vec![task.id.clone()],
                    });
                }
            }

            if task.stress == StressLevel::High {
                warnings.push(RescheduleWarning {
                    kind: WarningKind::OptimalTime,
                    severity: Severity::Medium,
                    message: format!("{} is high priority - reschedule carefully", task.title),
                    affected_tasks: vec![task.id.clone()],
                });
            }
        }

        warnings
    }

    /// [`Self::preview_warnings`] plus conflict and overload checks on the target day.
    pub fn preview_for_date(
        &self,
        tasks: &[Task],
        task_ids: &[String],
        new_date: NaiveDate,
        preferences: &Preferences,
        now: DateTime<Utc>,
    ) -> Vec<RescheduleWarning> {
        let mut warnings = self.preview_warnings(tasks, task_ids, now);

        let moved: Vec<Task> = self
            .reschedule(tasks, task_ids, new_date)
            .into_iter()
            .filter(|t| task_ids.contains(&t.id))
            .collect();
        let staying: Vec<&Task> = tasks
            .iter()
            .filter(|t| !task_ids.contains(&t.id) && t.day() == new_date)
            .collect();

        for (i, task) in moved.iter().enumerate() {
            let others = staying.iter().copied().chain(moved[i + 1..].iter());
            for other in others {
                if tasks_conflict(task, other) {
                    warnings.push(RescheduleWarning {
                        kind: WarningKind::Conflict,
                        severity: Severity::Medium,
                        message: format!(
                            "{} would overlap {} on {}",
                            task.title,
                            other.title,
                            new_date.format("%-m/%-d/%Y")
                        ),
                        affected_tasks: vec![task.id.clone(), other.id.clone()],
                    });
                }
            }
        }

        let booked: f64 = staying.iter().map(|t| t.duration_hours).sum::<f64>()
            + moved.iter().map(|t| t.duration_hours).sum::<f64>();
        let limit = preferences.preferred_hours_per_day() * self.overload_factor;
        if !moved.is_empty() && booked > limit {
            warnings.push(RescheduleWarning {
                kind: WarningKind::Overload,
                severity: Severity::Medium,
                message: format!(
                    "{} would have {:.1} hours booked",
                    new_date.format("%-m/%-d/%Y"),
                    booked
                ),
                affected_tasks: moved.iter().map(|t| t.id.clone()).collect(),
            });
        }

        warnings
    }

    /// Move one task to a new start instant.
    ///
    /// The move always succeeds for a known task; a notice is returned when
    /// the new start is after the task's due date.
    ///
    /// # Errors
    /// [`CoreError::TaskNotFound`] when no task has `task_id`.
    pub fn move_task(
        &self,
        tasks: &mut [Task],
        task_id: &str,
        new_start: DateTime<Utc>,
    ) -> Result<Option<DeadlineNotice>, CoreError> {
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| CoreError::TaskNotFound(task_id.to_string()))?;

        task.start = new_start;
        tracing::info!(task_id, %new_start, "moved task");

        let notice = match task.due_date {
            Some(due) if new_start > due => {
                let message = format!(
                    "{} is now scheduled for {} which is after its deadline ({})",
                    task.title,
                    new_start.format("%b %-d, %Y %H:%M"),
                    due.format("%b %-d, %Y %H:%M")
                );
                tracing::warn!(task_id, "{message}");
                Some(DeadlineNotice {
                    task_id: task.id.clone(),
                    task_title: task.title.clone(),
                    new_start,
                    due_date: due,
                    message,
                })
            }
            _ => None,
        };

        Ok(notice)
    }

    /// Drop a task onto an hour slot of a calendar day (`hour:00`).
    pub fn move_task_to_slot(
        &self,
        tasks: &mut [Task],
        task_id: &str,
        date: NaiveDate,
        hour: u32,
    ) -> Result<Option<DeadlineNotice>, CoreError> {
        let start = date.and_hms_opt(hour, 0, 0).ok_or_else(|| {
            ValidationErrors(vec![ValidationError::InvalidValue {
                field: "hour".to_string(),
                message: format!("{hour} is not an hour of the day"),
            }])
        })?;
        self.move_task(tasks, task_id, start.and_utc())
    }
}

/// Same time of day on another date.
fn on_date(instant: DateTime<Utc>, date: NaiveDate) -> DateTime<Utc> {
    date.and_time(instant.time()).and_utc()
}

/// Whole days until `due`, rounded down (overdue is negative).
fn whole_days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    ((due - now).num_milliseconds() as f64 / MILLIS_PER_DAY).floor() as i64
}
