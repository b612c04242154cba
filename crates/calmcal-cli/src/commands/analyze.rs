//! Stress metrics, computed locally or by the configured analyzer service.

use calmcal_core::task::StressBand;
use calmcal_core::{MetricsSource, MetricsTracker, RemoteMetricsClient, StressMetrics};
use clap::Args;
use serde::Serialize;

use super::{print_json, CmdResult, Context};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Ask the service at metrics.service_url instead of computing locally
    #[arg(long)]
    remote: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisReport {
    /// Absent when the remote service could not be reached
    metrics: Option<StressMetrics>,
    base_score: u32,
    stress_level: &'static str,
}

pub fn run(ctx: &Context, args: AnalyzeArgs) -> CmdResult {
    let config = ctx.load_config()?;
    let planner = ctx.planner()?;
    let base_score = planner.base_score();

    let metrics = if args.remote {
        let client = RemoteMetricsClient::from_config(&config.metrics)?
            .ok_or("metrics.service_url is not set")?;
        let tracker = MetricsTracker::new();
        let runtime = tokio::runtime::Runtime::new()?;
        let source: &dyn MetricsSource = &client;
        runtime.block_on(tracker.refresh(source, planner.tasks(), planner.preferences()))
    } else {
        Some(planner.metrics_at(ctx.now()))
    };

    print_json(&AnalysisReport {
        metrics,
        base_score,
        stress_level: StressBand::from_score(f64::from(base_score)).label(),
    })
}
