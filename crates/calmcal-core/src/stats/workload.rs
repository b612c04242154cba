//! Workload and stress metrics.
//!
//! Computes four scores in [0, 100] from the full task set:
//! - **Busy score**: scheduled hours against a 7-day capacity
//! - **Procrastination risk**: share of high-stress tasks due within 3 days
//! - **Day intensity**: the most loaded day against the daily budget
//! - **Deadline pressure**: share of high-stress tasks due within 7 days
//!
//! Recommendations come from independent threshold rules, so any number of
//! them can fire at once.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::balance::WorkLifeBalance;
use crate::preferences::Preferences;
use crate::task::{StressLevel, Task};

/// Snapshot of derived workload metrics. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StressMetrics {
    pub busy_score: f64,
    pub procrastination_risk: f64,
    pub day_intensity: f64,
    pub deadline_pressure: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_life_balance: Option<WorkLifeBalance>,
}

impl StressMetrics {
    /// Attach a caller-computed balance record.
    pub fn with_work_life_balance(mut self, balance: WorkLifeBalance) -> Self {
        self.work_life_balance = Some(balance);
        self
    }
}

/// Analyzer for workload metrics
#[derive(Debug, Clone)]
pub struct WorkloadAnalyzer {
    /// Days of capacity the busy score is measured against
    pub capacity_days: f64,
    /// Tasks due sooner than this (days) count toward procrastination risk
    pub procrastination_window_days: f64,
    /// Tasks due within this many days count toward deadline pressure
    pub deadline_window_days: f64,
    /// A day above `preferred hours * overload_factor` is overloaded
    pub overload_factor: f64,
}

impl Default for WorkloadAnalyzer {
    fn default() -> Self {
        Self {
            capacity_days: 7.0,
            procrastination_window_days: 3.0,
            deadline_window_days: 7.0,
            overload_factor: 1.3,
        }
    }
}

impl WorkloadAnalyzer {
    /// Create a new analyzer with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze against the current time.
    pub fn analyze(&self, tasks: &[Task], preferences: &Preferences) -> StressMetrics {
        self.analyze_at(tasks, preferences, Utc::now())
    }

    /// Analyze with an explicit "now" for due-date distances.
    pub fn analyze_at(
        &self,
        tasks: &[Task],
        preferences: &Preferences,
        now: DateTime<Utc>,
    ) -> StressMetrics {
        if tasks.is_empty() {
            return StressMetrics::default();
        }

        let preferred = preferences.preferred_hours_per_day();
        let total_count = tasks.len();

        let total_hours: f64 = tasks.iter().map(|t| t.duration_hours).sum();
        let busy_score = capped_percent(total_hours, self.capacity_days * preferred);

        let procrastinating = count_high_stress_due(tasks, now, |days| {
            days < self.procrastination_window_days
        });
        let procrastination_risk = capped_percent(procrastinating as f64, total_count as f64);

        let hours_by_day = hours_by_day(tasks);
        let max_day_hours = hours_by_day.values().copied().fold(0.0, f64::max);
        let day_intensity = capped_percent(max_day_hours, preferred);

        let pressing = count_high_stress_due(tasks, now, |days| days <= self.deadline_window_days);
        let deadline_pressure = capped_percent(pressing as f64, total_count.max(1) as f64);

        let mut recommendations = Vec::new();
        if procrastination_risk > 60.0 {
            recommendations.push(format!(
                "High procrastination risk - {procrastinating} tasks due soon"
            ));
        }
        if day_intensity > 80.0 {
            let threshold = preferred * self.overload_factor;
            if let Some((day, _)) = hours_by_day.iter().find(|(_, hours)| **hours > threshold) {
                recommendations.push(format!(
                    "{} is overloaded - consider rescheduling",
                    day.format("%-m/%-d/%Y")
                ));
            }
        }
        if deadline_pressure < 30.0 && busy_score < 50.0 {
            recommendations.push("Great job! Your workload is well-balanced".to_string());
        }
        if busy_score > 80.0 {
            recommendations.push("Schedule is packed - prioritize high-impact tasks".to_string());
        }

        StressMetrics {
            busy_score,
            procrastination_risk,
            day_intensity,
            deadline_pressure,
            recommendations,
            work_life_balance: None,
        }
    }
}

/// Hours booked per calendar day, in order of first appearance.
pub fn hours_by_day(tasks: &[Task]) -> IndexMap<NaiveDate, f64> {
    let mut by_day: IndexMap<NaiveDate, f64> = IndexMap::new();
    for task in tasks {
        *by_day.entry(task.day()).or_insert(0.0) += task.duration_hours;
    }
    by_day
}

fn count_high_stress_due(tasks: &[Task], now: DateTime<Utc>, within: impl Fn(f64) -> bool) -> usize {
    tasks
        .iter()
        .filter(|t| t.stress == StressLevel::High)
        .filter_map(|t| t.days_until_due(now))
        .filter(|days| within(*days))
        .count()
}

fn capped_percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    (part / whole * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 16, 12, 0, 0).unwrap()
    }

    fn task(day: u32, hour: u32, duration: f64, stress: StressLevel) -> Task {
        Task::new(
            "t",
            "Study",
            Utc.with_ymd_and_hms(2025, 11, day, hour, 0, 0).unwrap(),
            duration,
            stress,
        )
    }

    #[test]
    fn empty_task_set_is_all_zero() {
        let metrics = WorkloadAnalyzer::new().analyze_at(&[], &Preferences::default(), now());
        assert_eq!(metrics.busy_score, 0.0);
        assert_eq!(metrics.procrastination_risk, 0.0);
        assert_eq!(metrics.day_intensity, 0.0);
        assert_eq!(metrics.deadline_pressure, 0.0);
        assert!(metrics.recommendations.is_empty());
    }

    #[test]
    fn busy_score_uses_weekly_capacity() {
        let prefs = Preferences::default().with_work_hours(6.0);
        let metrics =
            WorkloadAnalyzer::new().analyze_at(&[task(17, 9, 6.0, StressLevel::Low)], &prefs, now());
        assert!((metrics.busy_score - 100.0 / 7.0).abs() < 1e-9);
        assert!((metrics.day_intensity - 100.0).abs() < 1e-9);
    }

    #[test]
    fn procrastination_counts_high_stress_due_within_three_days() {
        let due = now() + Duration::days(1);
        let tasks: Vec<Task> = (0..3)
            .map(|i| task(17, 9 + i, 1.0, StressLevel::High).with_due_date(due))
            .collect();

        let metrics = WorkloadAnalyzer::new().analyze_at(&tasks, &Preferences::default(), now());
        assert_eq!(metrics.procrastination_risk, 100.0);
        assert_eq!(metrics.deadline_pressure, 100.0);
        assert!(metrics
            .recommendations
            .contains(&"High procrastination risk - 3 tasks due soon".to_string()));
    }

    #[test]
    fn stress_and_deadline_are_independent_signals() {
        let soon = now() + Duration::hours(12);
        let tasks = vec![
            // Due soon but only medium stress: ignored by both ratios
            task(17, 9, 1.0, StressLevel::Medium).with_due_date(soon),
            // High stress, due in 5 days: pressure only
            task(17, 11, 1.0, StressLevel::High).with_due_date(now() + Duration::days(5)),
            // High stress without a due date: ignored
            task(17, 13, 1.0, StressLevel::High),
            // High stress, far away
            task(17, 15, 1.0, StressLevel::High).with_due_date(now() + Duration::days(30)),
        ];
        let metrics = WorkloadAnalyzer::new().analyze_at(&tasks, &Preferences::default(), now());
        assert_eq!(metrics.procrastination_risk, 0.0);
        assert_eq!(metrics.deadline_pressure, 25.0);
    }

    #[test]
    fn overloaded_day_is_the_first_one_found() {
        let tasks = vec![
            task(18, 9, 9.0, StressLevel::Low),
            task(17, 9, 10.0, StressLevel::Low),
        ];
        let metrics = WorkloadAnalyzer::new().analyze_at(&tasks, &Preferences::default(), now());
        assert_eq!(metrics.day_intensity, 100.0);
        assert!(metrics
            .recommendations
            .contains(&"11/18/2025 is overloaded - consider rescheduling".to_string()));
    }

    #[test]
    fn intense_but_not_overloaded_day_gives_no_reschedule_hint() {
        // 7h on a 6h budget: intensity 100, but below the 1.3x overload line
        let metrics = WorkloadAnalyzer::new().analyze_at(
            &[task(17, 9, 7.0, StressLevel::Low)],
            &Preferences::default(),
            now(),
        );
        assert_eq!(metrics.day_intensity, 100.0);
        assert!(!metrics.recommendations.iter().any(|r| r.contains("overloaded")));
    }

    #[test]
    fn packed_schedule_warning() {
        let tasks: Vec<Task> = (17..24).map(|d| task(d, 9, 6.0, StressLevel::Low)).collect();
        let metrics = WorkloadAnalyzer::new().analyze_at(&tasks, &Preferences::default(), now());
        assert_eq!(metrics.busy_score, 100.0);
        assert!(metrics
            .recommendations
            .contains(&"Schedule is packed - prioritize high-impact tasks".to_string()));
        assert!(!metrics.recommendations.iter().any(|r| r.starts_with("Great job")));
    }

    #[test]
    fn light_schedule_gets_positive_reinforcement() {
        let metrics = WorkloadAnalyzer::new().analyze_at(
            &[task(17, 9, 2.0, StressLevel::Low)],
            &Preferences::default(),
            now(),
        );
        assert_eq!(
            metrics.recommendations,
            vec!["Great job! Your workload is well-balanced".to_string()]
        );
    }

    #[test]
    fn serializes_camel_case() {
        let metrics = WorkloadAnalyzer::new().analyze_at(&[], &Preferences::default(), now());
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json.get("busyScore").is_some());
        assert!(json.get("procrastinationRisk").is_some());
        assert!(json.get("workLifeBalance").is_none());
    }
}
