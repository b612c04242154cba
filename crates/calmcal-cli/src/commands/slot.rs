use chrono::{DateTime, Utc};
use clap::Subcommand;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum SlotAction {
    /// Earliest free daytime slot, starting the morning after --after
    Find {
        /// Duration in hours
        #[arg(long)]
        hours: f64,
        /// Search from this instant instead of now (RFC 3339)
        #[arg(long)]
        after: Option<DateTime<Utc>>,
    },
}

pub fn run(ctx: &Context, action: SlotAction) -> CmdResult {
    match action {
        SlotAction::Find { hours, after } => {
            let planner = ctx.planner()?;
            let start = planner.find_slot(hours, after.unwrap_or_else(|| ctx.now()))?;
            let end = calmcal_core::task::shift_by_hours(start, hours);
            print_json(&serde_json::json!({ "start": start, "end": end }))?;
        }
    }
    Ok(())
}
