//! Statistics module for CalmCal
//!
//! This module derives workload metrics from the task list: busy score,
//! procrastination risk, day intensity, deadline pressure, recommendations
//! and the work-life balance record.

mod balance;
mod workload;

pub use balance::WorkLifeBalance;
pub use workload::{hours_by_day, StressMetrics, WorkloadAnalyzer};
