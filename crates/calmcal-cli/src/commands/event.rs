//! Event creation: validate, expand into subtasks, place, save.

use calmcal_core::{EventRequest, Frequency, Priority, Recurrence, TaskCategory};
use chrono::{DateTime, Utc};
use clap::Subcommand;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event; known types are split into a subtask chain
    Add {
        /// Event title
        title: String,
        /// Event type (assignment, study, project, exam, meeting, sleep, gym, movie, travel, ...)
        #[arg(long = "type")]
        event_type: String,
        /// Due date (RFC 3339)
        #[arg(long)]
        due: DateTime<Utc>,
        /// Priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Estimated hours, used when the type has no template
        #[arg(long, default_value = "1")]
        hours: f64,
        /// Recurrence: none, daily, weekly or monthly
        #[arg(long, default_value = "none")]
        recurrence: String,
        /// Last date of the recurrence (RFC 3339)
        #[arg(long)]
        recurrence_end: Option<DateTime<Utc>>,
        /// Override the category implied by the type: work or personal
        #[arg(long)]
        category: Option<TaskCategory>,
    },
}

pub fn run(ctx: &Context, action: EventAction) -> CmdResult {
    match action {
        EventAction::Add {
            title,
            event_type,
            due,
            priority,
            hours,
            recurrence,
            recurrence_end,
            category,
        } => {
            let mut request = EventRequest::new(title, event_type, due, priority, hours);
            if !recurrence.eq_ignore_ascii_case("none") {
                let frequency: Frequency = recurrence.parse()?;
                request = request.with_recurrence(Recurrence {
                    frequency,
                    end_date: recurrence_end,
                });
            }
            if let Some(category) = category {
                request = request.with_category(category);
            }

            let mut planner = ctx.planner()?;
            let created = planner.add_event(&request, ctx.now())?;
            ctx.save(&planner)?;
            print_json(&created)?;
        }
    }
    Ok(())
}
