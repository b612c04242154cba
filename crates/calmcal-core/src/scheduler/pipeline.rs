//! Event expansion and placement pipeline.
//!
//! Turns a validated event into tasks: the catalog decides the subtask chain,
//! the classifier the stress tier, and the slot finder the start times. Each
//! placed subtask joins the working set so later ones never land on it.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, SlotError};
use crate::event::{EventRequest, ValidEvent};
use crate::scheduler::SlotFinder;
use crate::task::{classify, SubtaskCatalog, Task};

/// Schedules events onto an existing task list.
pub struct EventScheduler<'a> {
    catalog: &'a SubtaskCatalog,
    finder: &'a SlotFinder,
}

impl<'a> EventScheduler<'a> {
    pub fn new(catalog: &'a SubtaskCatalog, finder: &'a SlotFinder) -> Self {
        Self { catalog, finder }
    }

    /// Validate, expand and place an event request.
    ///
    /// # Errors
    /// Validation errors block creation before any slot is searched;
    /// slot errors abort the whole event (no partial chains are returned).
    pub fn schedule_event(
        &self,
        request: &EventRequest,
        existing: &[Task],
        now: DateTime<Utc>,
    ) -> Result<Vec<Task>, CoreError> {
        let event = request.validate()?;
        Ok(self.schedule_valid(&event, existing, now)?)
    }

    /// Place an already validated event.
    pub fn schedule_valid(
        &self,
        event: &ValidEvent,
        existing: &[Task],
        now: DateTime<Utc>,
    ) -> Result<Vec<Task>, SlotError> {
        let stress = classify(event.priority);
        let display_type = event.display_type();
        let subtasks = self.catalog.expand(&event.event_type);

        if subtasks.is_empty() {
            let start =
                self.finder
                    .find_next_available_slot(existing, event.estimated_hours, now)?;
            let mut task = Task::new(
                event.title.clone(),
                display_type,
                start,
                event.estimated_hours,
                stress,
            )
            .with_due_date(event.due_date)
            .with_category(event.category);
            if let Some(recurrence) = &event.recurrence {
                task = task.with_recurrence(recurrence.clone());
            }
            tracing::debug!(title = %task.title, start = %task.start, "placed single task");
            return Ok(vec![task]);
        }

        let parent_id = uuid::Uuid::new_v4().to_string();
        let mut working = existing.to_vec();
        let mut created = Vec::with_capacity(subtasks.len());
        let mut previous_end: Option<DateTime<Utc>> = None;

        for subtask in &subtasks {
            let start = match previous_end {
                None => self
                    .finder
                    .find_next_available_slot(&working, subtask.duration_hours, now)?,
                Some(end) => self
                    .finder
                    .find_slot_from(&working, subtask.duration_hours, end)?,
            };

            let task = Task::new(
                format!("{}: {}", event.title, subtask.title),
                display_type.clone(),
                start,
                subtask.duration_hours,
                stress,
            )
            .with_due_date(event.due_date)
            .with_category(event.category)
            .with_parent(parent_id.clone(), event.title.clone());

            tracing::debug!(order = subtask.order, title = %task.title, start = %task.start, "placed subtask");
            previous_end = Some(task.end());
            working.push(task.clone());
            created.push(task);
        }

        Ok(created)
    }
}
