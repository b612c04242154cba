use clap::Subcommand;
use serde::Serialize;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum TemplatesAction {
    /// Event types with their step count and total hours
    List,
    /// Steps of one event type
    Show {
        /// Event type
        event_type: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateSummary<'a> {
    event_type: &'a str,
    steps: usize,
    total_hours: f64,
}

pub fn run(ctx: &Context, action: TemplatesAction) -> CmdResult {
    let catalog = ctx.load_config()?.catalog();
    match action {
        TemplatesAction::List => {
            let summary: Vec<TemplateSummary> = catalog
                .event_types()
                .into_iter()
                .map(|event_type| TemplateSummary {
                    event_type,
                    steps: catalog.expand(event_type).len(),
                    total_hours: catalog.total_hours(event_type),
                })
                .collect();
            print_json(&summary)?;
        }
        TemplatesAction::Show { event_type } => {
            if !catalog.knows(&event_type) {
                return Err(format!("no template for event type: {event_type}").into());
            }
            print_json(&catalog.expand(&event_type))?;
        }
    }
    Ok(())
}
