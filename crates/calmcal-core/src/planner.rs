//! In-memory planning session.
//!
//! A [`Planner`] owns the task list and everything needed to change it:
//! preferences, the subtask catalog and the slot finder. Mutations go through
//! its methods so the list stays the single source of truth; metrics are
//! recomputed from it on demand.

use chrono::{DateTime, NaiveDate, Utc};

use crate::agenda;
use crate::assistant::AssistantContext;
use crate::error::{CoreError, SlotError, ValidationError, ValidationErrors};
use crate::event::EventRequest;
use crate::preferences::Preferences;
use crate::reschedule::{DeadlineNotice, RescheduleEngine, RescheduleWarning};
use crate::scheduler::{EventScheduler, SlotFinder};
use crate::stats::{StressMetrics, WorkLifeBalance, WorkloadAnalyzer};
use crate::storage::Config;
use crate::task::{StressClassifier, SubtaskCatalog, Task};

/// Planning session over one task list.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    tasks: Vec<Task>,
    preferences: Preferences,
    catalog: SubtaskCatalog,
    finder: SlotFinder,
    analyzer: WorkloadAnalyzer,
    engine: RescheduleEngine,
}

impl Planner {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            ..Self::default()
        }
    }

    /// Session configured from `config`, starting with `tasks`.
    pub fn from_config(config: &Config, tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            preferences: config.preferences(),
            catalog: config.catalog(),
            finder: config.slot_finder(),
            analyzer: WorkloadAnalyzer::default(),
            engine: RescheduleEngine::default(),
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_catalog(mut self, catalog: SubtaskCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_slot_finder(mut self, finder: SlotFinder) -> Self {
        self.finder = finder;
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }

    pub fn catalog(&self) -> &SubtaskCatalog {
        &self.catalog
    }

    /// Validate, expand and place an event; the created tasks are appended.
    pub fn add_event(
        &mut self,
        request: &EventRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<Task>, CoreError> {
        let created = EventScheduler::new(&self.catalog, &self.finder)
            .schedule_event(request, &self.tasks, now)?;
        tracing::info!(title = %request.title, count = created.len(), "added event");
        self.tasks.extend(created.iter().cloned());
        Ok(created)
    }

    /// Add a hand-placed task as is. Overlaps are allowed; durations must fit
    /// within `max_task_hours`.
    pub fn add_task(&mut self, task: Task) -> Result<(), CoreError> {
        let mut errors = Vec::new();
        if task.title.trim().is_empty() {
            errors.push(ValidationError::EmptyTitle);
        }
        let max_hours = self.finder.config().max_task_hours;
        if !task.has_valid_duration() {
            errors.push(ValidationError::InvalidValue {
                field: "duration".to_string(),
                message: format!("must be a positive number of hours (got {})", task.duration_hours),
            });
        } else if task.duration_hours > max_hours {
            errors.push(ValidationError::InvalidValue {
                field: "duration".to_string(),
                message: format!(
                    "{} hours exceeds the {max_hours} hour maximum",
                    task.duration_hours
                ),
            });
        }
        if self.task(&task.id).is_some() {
            errors.push(ValidationError::InvalidValue {
                field: "id".to_string(),
                message: format!("a task with id {} already exists", task.id),
            });
        }
        if !errors.is_empty() {
            return Err(ValidationErrors(errors).into());
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Remove a task by id.
    pub fn remove_task(&mut self, id: &str) -> Result<Task, CoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        Ok(self.tasks.remove(index))
    }

    /// Earliest free slot from tomorrow morning on.
    pub fn find_slot(&self, duration_hours: f64, now: DateTime<Utc>) -> Result<DateTime<Utc>, SlotError> {
        self.finder
            .find_next_available_slot(&self.tasks, duration_hours, now)
    }

    /// Move the selected tasks to `date`, keeping their times of day.
    pub fn reschedule(&mut self, task_ids: &[String], date: NaiveDate) -> Vec<String> {
        self.engine.apply(&mut self.tasks, task_ids, date)
    }

    /// Warnings for a pending reschedule to `date`.
    pub fn preview(
        &self,
        task_ids: &[String],
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Vec<RescheduleWarning> {
        self.engine
            .preview_for_date(&self.tasks, task_ids, date, &self.preferences, now)
    }

    pub fn move_task(
        &mut self,
        task_id: &str,
        new_start: DateTime<Utc>,
    ) -> Result<Option<DeadlineNotice>, CoreError> {
        self.engine.move_task(&mut self.tasks, task_id, new_start)
    }

    pub fn move_task_to_slot(
        &mut self,
        task_id: &str,
        date: NaiveDate,
        hour: u32,
    ) -> Result<Option<DeadlineNotice>, CoreError> {
        self.engine
            .move_task_to_slot(&mut self.tasks, task_id, date, hour)
    }

    /// Metrics for the current list, with the work-life balance attached.
    pub fn metrics_at(&self, now: DateTime<Utc>) -> StressMetrics {
        self.analyzer
            .analyze_at(&self.tasks, &self.preferences, now)
            .with_work_life_balance(WorkLifeBalance::from_tasks(&self.tasks))
    }

    /// Fallback score shown before any metrics exist.
    pub fn base_score(&self) -> u32 {
        StressClassifier::new().base_score(&self.tasks)
    }

    pub fn upcoming(&self, now: DateTime<Utc>, limit: Option<usize>) -> Vec<&Task> {
        agenda::upcoming(&self.tasks, now, limit)
    }

    pub fn in_progress(&self, now: DateTime<Utc>) -> Vec<&Task> {
        agenda::in_progress(&self.tasks, now)
    }

    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        agenda::on_date(&self.tasks, date)
    }

    /// Read-only copy for the chat assistant.
    pub fn snapshot(&self) -> AssistantContext {
        AssistantContext::new(&self.tasks, &self.preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, StressLevel, TaskCategory};
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn events_accumulate_without_overlap() {
        let mut planner = Planner::new(Preferences::default());
        let now = at(16, 12);
        planner
            .add_event(
                &EventRequest::new("Essay", "assignment", at(24, 23), Priority::High, 5.0),
                now,
            )
            .unwrap();
        planner
            .add_event(
                &EventRequest::new("Midterm", "exam", at(25, 9), Priority::Medium, 8.0),
                now,
            )
            .unwrap();

        assert_eq!(planner.tasks().len(), 10);
        assert!(crate::task::find_conflicts(planner.tasks()).is_empty());
        assert_eq!(planner.base_score(), 100);
    }

    #[test]
    fn failed_event_leaves_list_untouched() {
        let mut planner = Planner::new(Preferences::default());
        let bad = EventRequest::new("", "study", at(20, 9), Priority::Low, 2.0);
        assert!(planner.add_event(&bad, at(16, 12)).is_err());
        assert!(planner.tasks().is_empty());
    }

    #[test]
    fn manual_tasks_are_checked() {
        let mut planner = Planner::new(Preferences::default());
        let task = Task::new("Gym", "Gym", at(17, 18), 1.0, StressLevel::Low).with_id("g");
        planner.add_task(task.clone()).unwrap();
        assert!(planner.add_task(task).is_err());
        assert!(planner
            .add_task(Task::new("Zero", "Study", at(17, 9), 0.0, StressLevel::Low))
            .is_err());

        assert!(planner
            .add_task(Task::new("Huge", "Study", at(17, 9), 1e10, StressLevel::Low))
            .is_err());
        assert!(planner
            .add_task(Task::new("Long", "Study", at(17, 9), 25.0, StressLevel::Low))
            .is_err());

        assert_eq!(planner.remove_task("g").unwrap().title, "Gym");
        assert!(matches!(planner.remove_task("g"), Err(CoreError::TaskNotFound(_))));
    }

    #[test]
    fn oversized_stored_task_does_not_break_slot_search() {
        let planner = Planner::new(Preferences::default()).with_tasks(vec![Task::new(
            "Huge",
            "Study",
            at(18, 9),
            1e10,
            StressLevel::Low,
        )]);
        let start = planner.find_slot(1.0, at(16, 12)).unwrap();
        assert_eq!(start, at(19, 9));
        assert!(crate::task::find_conflicts(planner.tasks()).is_empty());
        assert_eq!(planner.upcoming(at(16, 12), None).len(), 1);
    }

    #[test]
    fn metrics_include_balance() {
        let planner = Planner::new(Preferences::default()).with_tasks(vec![
            Task::new("Work", "Study", at(17, 9), 4.0, StressLevel::Low),
            Task::new("Run", "Gym", at(17, 18), 2.0, StressLevel::Low)
                .with_category(TaskCategory::Personal),
        ]);
        let metrics = planner.metrics_at(at(16, 12));
        let balance = metrics.work_life_balance.unwrap();
        assert_eq!(balance.work_hours, 4.0);
        assert_eq!(balance.personal_hours, 2.0);
        assert_eq!(balance.balance_score, 50.0);
    }

    #[test]
    fn reschedule_then_query_day() {
        let mut planner = Planner::new(Preferences::default()).with_tasks(vec![
            Task::new("A", "Study", at(17, 9), 1.0, StressLevel::Low).with_id("a"),
            Task::new("B", "Study", at(17, 11), 1.0, StressLevel::Low).with_id("b"),
        ]);
        let target = NaiveDate::from_ymd_opt(2025, 11, 19).unwrap();
        let moved = planner.reschedule(&["a".to_string()], target);
        assert_eq!(moved, vec!["a".to_string()]);
        assert_eq!(planner.tasks_on(target).len(), 1);
        assert_eq!(planner.task("a").unwrap().start, at(19, 9));
        assert_eq!(planner.snapshot().tasks.len(), 2);
    }
}
