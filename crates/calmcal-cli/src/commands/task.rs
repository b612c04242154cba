//! Task list commands.

use calmcal_core::task::find_conflicts;
use calmcal_core::{classify, Priority, Task, TaskCategory};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task at a fixed start time
    Add {
        /// Task title
        title: String,
        /// Type label shown on the task
        #[arg(long = "type", default_value = "Task")]
        task_type: String,
        /// Start time (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,
        /// Duration in hours
        #[arg(long)]
        hours: f64,
        /// Priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Due date (RFC 3339)
        #[arg(long)]
        due: Option<DateTime<Utc>>,
        /// Category: work or personal
        #[arg(long)]
        category: Option<TaskCategory>,
    },
    /// List all tasks by start time
    List,
    /// Tasks starting after now
    Upcoming {
        /// Maximum number of tasks
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Tasks on one calendar day
    On {
        /// Date (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// Pairs of overlapping tasks
    Conflicts,
    /// Delete a task
    Remove {
        /// Task ID
        id: String,
    },
}

pub fn run(ctx: &Context, action: TaskAction) -> CmdResult {
    match action {
        TaskAction::Add {
            title,
            task_type,
            start,
            hours,
            priority,
            due,
            category,
        } => {
            let mut task = Task::new(title, task_type, start, hours, classify(priority));
            if let Some(due) = due {
                task = task.with_due_date(due);
            }
            if let Some(category) = category {
                task = task.with_category(category);
            }

            let mut planner = ctx.planner()?;
            planner.add_task(task.clone())?;
            ctx.save(&planner)?;
            print_json(&task)?;
        }
        TaskAction::List => {
            let mut tasks = ctx.task_file()?.load()?;
            tasks.sort_by_key(|t| t.start);
            print_json(&tasks)?;
        }
        TaskAction::Upcoming { limit } => {
            let planner = ctx.planner()?;
            let now = ctx.now();
            print_json(&serde_json::json!({
                "current": planner.in_progress(now),
                "upcoming": planner.upcoming(now, Some(limit)),
            }))?;
        }
        TaskAction::On { date } => {
            let planner = ctx.planner()?;
            print_json(&planner.tasks_on(date))?;
        }
        TaskAction::Conflicts => {
            let tasks = ctx.task_file()?.load()?;
            let pairs: Vec<_> = find_conflicts(&tasks)
                .into_iter()
                .map(|(a, b)| serde_json::json!({ "first": a, "second": b }))
                .collect();
            print_json(&pairs)?;
        }
        TaskAction::Remove { id } => {
            let mut planner = ctx.planner()?;
            let removed = planner.remove_task(&id)?;
            ctx.save(&planner)?;
            print_json(&removed)?;
        }
    }
    Ok(())
}
