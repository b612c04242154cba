//! Bulk rescheduling and single-task moves.

use calmcal_core::RescheduleWarning;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum RescheduleAction {
    /// Show warnings for a reschedule without changing anything
    Preview {
        /// Comma-separated task IDs
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Move the tasks to the date, keeping their times of day
    Apply {
        /// Comma-separated task IDs
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
}

#[derive(Args)]
pub struct MoveArgs {
    /// Task ID
    id: String,
    /// New start time (RFC 3339)
    #[arg(long, conflicts_with_all = ["date", "hour"], required_unless_present = "date")]
    at: Option<DateTime<Utc>>,
    /// Target date (YYYY-MM-DD), used with --hour
    #[arg(long, requires = "hour")]
    date: Option<NaiveDate>,
    /// Hour of day on --date
    #[arg(long, requires = "date")]
    hour: Option<u32>,
}

pub fn run(ctx: &Context, action: RescheduleAction) -> CmdResult {
    match action {
        RescheduleAction::Preview { ids, date } => {
            let planner = ctx.planner()?;
            let warnings = planner.preview(&ids, date, ctx.now());
            print_json(&warnings)?;
        }
        RescheduleAction::Apply { ids, date } => {
            let mut planner = ctx.planner()?;
            let warnings: Vec<RescheduleWarning> = planner.preview(&ids, date, ctx.now());
            for warning in &warnings {
                tracing::warn!("{}", warning.message);
            }
            let moved = planner.reschedule(&ids, date);
            ctx.save(&planner)?;
            print_json(&serde_json::json!({ "moved": moved, "warnings": warnings }))?;
        }
    }
    Ok(())
}

pub fn run_move(ctx: &Context, args: MoveArgs) -> CmdResult {
    let mut planner = ctx.planner()?;
    let notice = match (args.at, args.date, args.hour) {
        (Some(at), _, _) => planner.move_task(&args.id, at)?,
        (None, Some(date), Some(hour)) => planner.move_task_to_slot(&args.id, date, hour)?,
        _ => return Err("either --at or --date with --hour is required".into()),
    };
    ctx.save(&planner)?;
    print_json(&serde_json::json!({
        "task": planner.task(&args.id),
        "deadlineNotice": notice,
    }))
}
