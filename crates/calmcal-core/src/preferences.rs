//! User preferences collected during onboarding.
//!
//! Preferences are an explicit value passed into every analyzer call; the core
//! never reads them from ambient storage.

use serde::{Deserialize, Serialize};

/// Fallback daily hour budget when none is set.
pub const DEFAULT_WORK_HOURS_PER_DAY: f64 = 6.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkStyle {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Flexible,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BreakFrequency {
    Frequent,
    #[default]
    Moderate,
    Minimal,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskDistribution {
    Focused,
    #[default]
    Mixed,
}

/// Preferences record shared with the analyzer and the metrics service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, alias = "work_hours_per_day", skip_serializing_if = "Option::is_none")]
    pub work_hours_per_day: Option<f64>,
    #[serde(default, alias = "work_style", skip_serializing_if = "Option::is_none")]
    pub work_style: Option<WorkStyle>,
    #[serde(default, alias = "break_frequency", skip_serializing_if = "Option::is_none")]
    pub break_frequency: Option<BreakFrequency>,
    #[serde(default, alias = "task_distribution", skip_serializing_if = "Option::is_none")]
    pub task_distribution: Option<TaskDistribution>,
}

impl Preferences {
    pub fn with_work_hours(mut self, hours: f64) -> Self {
        self.work_hours_per_day = Some(hours);
        self
    }

    /// Daily hour budget; unset, zero or nonsensical values fall back to 6.
    pub fn preferred_hours_per_day(&self) -> f64 {
        match self.work_hours_per_day {
            Some(h) if h.is_finite() && h > 0.0 => h,
            _ => DEFAULT_WORK_HOURS_PER_DAY,
        }
    }
}
