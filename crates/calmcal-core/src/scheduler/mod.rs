//! Slot finder for placing tasks into free daytime slots.
//!
//! The search starts at the opening of the daytime window on the day after
//! the earliest candidate, tests the candidate against every existing task
//! and steps forward one hour at a time until it is conflict-free:
//! - Conflicts only count between tasks on the same calendar day
//! - A candidate that reaches the window close snaps to the next morning
//! - The search is bounded by `max_search_days`

pub mod pipeline;

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SlotError;
use crate::task::Task;

pub use pipeline::EventScheduler;

/// Slot search configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulerConfig {
    /// Hour the daytime window opens
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,
    /// Hour the daytime window closes (at most 23); candidates at or past it move to the next day
    #[serde(default = "default_day_end_hour")]
    pub day_end_hour: u32,
    /// Step between candidates (minutes)
    #[serde(default = "default_step_minutes")]
    pub step_minutes: i64,
    /// Longest accepted task duration (hours)
    #[serde(default = "default_max_task_hours")]
    pub max_task_hours: f64,
    /// Days searched before giving up
    #[serde(default = "default_max_search_days")]
    pub max_search_days: u32,
}

fn default_day_start_hour() -> u32 {
    9
}
fn default_day_end_hour() -> u32 {
    21
}
fn default_step_minutes() -> i64 {
    60
}
fn default_max_task_hours() -> f64 {
    24.0
}
fn default_max_search_days() -> u32 {
    365
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            day_start_hour: default_day_start_hour(),
            day_end_hour: default_day_end_hour(),
            step_minutes: default_step_minutes(),
            max_task_hours: default_max_task_hours(),
            max_search_days: default_max_search_days(),
        }
    }
}

impl SchedulerConfig {
    /// Check that the window and limits are usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.day_start_hour >= self.day_end_hour || self.day_end_hour > 23 {
            return Err(format!(
                "day window {}:00-{}:00 is empty or out of range",
                self.day_start_hour, self.day_end_hour
            ));
        }
        if self.step_minutes <= 0 {
            return Err("step_minutes must be positive".into());
        }
        if !(self.max_task_hours.is_finite() && self.max_task_hours > 0.0) {
            return Err("max_task_hours must be positive".into());
        }
        if self.max_search_days == 0 {
            return Err("max_search_days must be at least 1".into());
        }
        Ok(())
    }
}

/// Finds the earliest conflict-free start for a task.
#[derive(Debug, Clone, Default)]
pub struct SlotFinder {
    config: SchedulerConfig,
}

impl SlotFinder {
    /// Create a finder with the default 09:00-21:00 window
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Earliest free slot, starting at the window opening on the day after
    /// `earliest_candidate`.
    ///
    /// # Errors
    /// Returns [`SlotError`] for unusable durations or when no slot exists
    /// within `max_search_days`.
    pub fn find_next_available_slot(
        &self,
        existing: &[Task],
        duration_hours: f64,
        earliest_candidate: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, SlotError> {
        self.check_duration(duration_hours)?;
        let next_day = earliest_candidate.date_naive() + Duration::days(1);
        self.search(existing, duration_hours, self.window_open(next_day))
    }

    /// Earliest free slot at or after `candidate` itself.
    ///
    /// A candidate outside the window is moved to the next window opening.
    /// Used to chain subtasks directly after each other.
    pub fn find_slot_from(
        &self,
        existing: &[Task],
        duration_hours: f64,
        candidate: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, SlotError> {
        self.check_duration(duration_hours)?;
        self.search(existing, duration_hours, self.clamp_to_window(candidate))
    }

    /// Whether `[start, start + duration)` conflicts with any existing task.
    pub fn has_conflict(existing: &[Task], start: DateTime<Utc>, duration_hours: f64) -> bool {
        existing
            .iter()
            .any(|task| task.conflicts_with(start, duration_hours))
    }

    fn search(
        &self,
        existing: &[Task],
        duration_hours: f64,
        start: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, SlotError> {
        let step = Duration::minutes(self.config.step_minutes.max(1));
        let limit = start + Duration::days(i64::from(self.config.max_search_days));
        let mut candidate = start;

        while Self::has_conflict(existing, candidate, duration_hours) {
            tracing::debug!(%candidate, duration_hours, "slot taken, advancing");
            let day = candidate.date_naive();
            candidate += step;
            if candidate.date_naive() != day || candidate.hour() >= self.config.day_end_hour {
                candidate = self.window_open(candidate.date_naive() + Duration::days(1));
            }
            if candidate >= limit {
                return Err(SlotError::NoSlotWithin {
                    days: self.config.max_search_days,
                });
            }
        }

        Ok(candidate)
    }

    fn check_duration(&self, duration_hours: f64) -> Result<(), SlotError> {
        if !(duration_hours.is_finite() && duration_hours > 0.0) {
            return Err(SlotError::InvalidDuration(duration_hours));
        }
        if duration_hours > self.config.max_task_hours {
            return Err(SlotError::DurationTooLong {
                hours: duration_hours,
                max: self.config.max_task_hours,
            });
        }
        Ok(())
    }

    fn clamp_to_window(&self, candidate: DateTime<Utc>) -> DateTime<Utc> {
        let day = candidate.date_naive();
        if candidate.hour() < self.config.day_start_hour {
            self.window_open(day)
        } else if candidate.hour() >= self.config.day_end_hour {
            self.window_open(day + Duration::days(1))
        } else {
            candidate
        }
    }

    fn window_open(&self, day: NaiveDate) -> DateTime<Utc> {
        let hour = self.config.day_start_hour.min(23);
        day.and_hms_opt(hour, 0, 0)
            .unwrap_or_else(|| day.and_time(chrono::NaiveTime::MIN))
            .and_utc()
    }
}
