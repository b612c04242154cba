//! Stress classification.
//!
//! Stress is a static function of the event priority. Deadline proximity is
//! not considered here; the workload analyzer measures it
//! separately, so the two can disagree.

use super::{Priority, StressLevel, Task};

/// Map a priority to its stress tier.
pub fn classify(priority: Priority) -> StressLevel {
    match priority {
        Priority::High => StressLevel::High,
        Priority::Medium => StressLevel::Medium,
        Priority::Low => StressLevel::Low,
    }
}

/// Classifier over raw priority labels coming from presentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StressClassifier;

impl StressClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a label; anything other than "high"/"medium" is low.
    pub fn classify_label(&self, priority: &str) -> StressLevel {
        priority
            .parse::<Priority>()
            .map(classify)
            .unwrap_or(StressLevel::Low)
    }

    /// Base stress score: 20 per high task plus 10 per medium task, capped at 100.
    pub fn base_score(&self, tasks: &[Task]) -> u32 {
        let high = tasks.iter().filter(|t| t.stress == StressLevel::High).count() as u32;
        let medium = tasks.iter().filter(|t| t.stress == StressLevel::Medium).count() as u32;
        (high * 20 + medium * 10).min(100)
    }
}

/// Display band for the base stress score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StressBand {
    Low,
    Moderate,
    High,
}

impl StressBand {
    pub fn from_score(score: f64) -> Self {
        if score <= 30.0 {
            StressBand::Low
        } else if score <= 60.0 {
            StressBand::Moderate
        } else {
            StressBand::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StressBand::Low => "Low Stress",
            StressBand::Moderate => "Moderate Stress",
            StressBand::High => "High Stress",
        }
    }

    /// Badge text shown next to an individual metric.
    pub fn metric_label(&self) -> &'static str {
        match self {
            StressBand::Low => "Good",
            StressBand::Moderate => "Moderate",
            StressBand::High => "High",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn classify_is_one_to_one() {
        assert_eq!(classify(Priority::High), StressLevel::High);
        assert_eq!(classify(Priority::Medium), StressLevel::Medium);
        assert_eq!(classify(Priority::Low), StressLevel::Low);
    }

    #[test]
    fn unknown_labels_are_low() {
        let classifier = StressClassifier::new();
        assert_eq!(classifier.classify_label("high"), StressLevel::High);
        assert_eq!(classifier.classify_label("Medium"), StressLevel::Medium);
        assert_eq!(classifier.classify_label("urgent"), StressLevel::Low);
        assert_eq!(classifier.classify_label(""), StressLevel::Low);
    }

    #[test]
    fn base_score_caps_at_100() {
        let classifier = StressClassifier::new();
        let now = Utc::now();
        let mut tasks: Vec<Task> = (0..3)
            .map(|i| Task::new(format!("h{i}"), "Exam", now, 1.0, StressLevel::High))
            .collect();
        tasks.push(Task::new("m", "Study", now, 1.0, StressLevel::Medium));
        tasks.push(Task::new("l", "Gym", now, 1.0, StressLevel::Low));
        assert_eq!(classifier.base_score(&tasks), 70);

        let many: Vec<Task> = (0..8)
            .map(|i| Task::new(format!("h{i}"), "Exam", now, 1.0, StressLevel::High))
            .collect();
        assert_eq!(classifier.base_score(&many), 100);
        assert_eq!(classifier.base_score(&[]), 0);
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(StressBand::from_score(30.0), StressBand::Low);
        assert_eq!(StressBand::from_score(30.5), StressBand::Moderate);
        assert_eq!(StressBand::from_score(60.0), StressBand::Moderate);
        assert_eq!(StressBand::from_score(61.0).label(), "High Stress");
        assert_eq!(StressBand::from_score(10.0).metric_label(), "Good");
    }
}
