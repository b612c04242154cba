//! Event requests coming from presentation.
//!
//! An [`EventRequest`] is ephemeral user input. It must pass [`EventRequest::validate`]
//! before anything is expanded or scheduled; every failing field is reported
//! at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationErrors};
use crate::task::{infer_category, Priority, Recurrence, TaskCategory};

pub const TITLE_MAX_CHARS: usize = 100;
pub const MIN_ESTIMATED_HOURS: f64 = 0.5;
pub const MAX_ESTIMATED_HOURS: f64 = 24.0;

/// Raw event input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEvent {
    /// Trimmed title
    pub title: String,
    /// Lowercased event type
    pub event_type: String,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    pub estimated_hours: f64,
    pub recurrence: Option<Recurrence>,
    /// Explicit category, or the one implied by the type
    pub category: TaskCategory,
}

impl ValidEvent {
    /// Type label shown on tasks, e.g. "assignment" -> "Assignment".
    pub fn display_type(&self) -> String {
        let mut chars = self.event_type.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl EventRequest {
    pub fn new(
        title: impl Into<String>,
        event_type: impl Into<String>,
        due_date: DateTime<Utc>,
        priority: Priority,
        estimated_hours: f64,
    ) -> Self {
        Self {
            title: title.into(),
            event_type: event_type.into(),
            due_date: Some(due_date),
            priority,
            estimated_hours,
            recurrence: None,
            category: None,
        }
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Validate every field.
    ///
    /// # Errors
    /// Returns all field errors found, never just the first.
    pub fn validate(&self) -> Result<ValidEvent, ValidationErrors> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(ValidationError::EmptyTitle);
        } else {
            let len = title.chars().count();
            if len > TITLE_MAX_CHARS {
                errors.push(ValidationError::TitleTooLong {
                    len,
                    max: TITLE_MAX_CHARS,
                });
            }
        }

        let event_type = self.event_type.trim().to_ascii_lowercase();
        if event_type.is_empty() {
            errors.push(ValidationError::MissingType);
        }

        if self.due_date.is_none() {
            errors.push(ValidationError::MissingDueDate);
        }

        let hours = self.estimated_hours;
        if !(hours.is_finite() && (MIN_ESTIMATED_HOURS..=MAX_ESTIMATED_HOURS).contains(&hours)) {
            errors.push(ValidationError::DurationOutOfRange {
                value: hours,
                min: MIN_ESTIMATED_HOURS,
                max: MAX_ESTIMATED_HOURS,
            });
        }

        if let Some(recurrence) = &self.recurrence {
            if let (Some(end), Some(due)) = (recurrence.end_date, self.due_date) {
                if end < due {
                    errors.push(ValidationError::InvalidValue {
                        field: "recurrence".to_string(),
                        message: "end date is before the due date".to_string(),
                    });
                }
            }
        }

        match self.due_date {
            Some(due_date) if errors.is_empty() => Ok(ValidEvent {
                title: title.to_string(),
                category: self.category.unwrap_or_else(|| infer_category(&event_type)),
                event_type,
                due_date,
                priority: self.priority,
                estimated_hours: hours,
                recurrence: self.recurrence.clone(),
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Frequency;
    use chrono::TimeZone;

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 24, 23, 59, 0).unwrap()
    }

    #[test]
    fn valid_request_resolves_category_and_type() {
        let request = EventRequest::new("  CS 101 Final  ", "Assignment", due(), Priority::High, 5.0);
        let valid = request.validate().unwrap();
        assert_eq!(valid.title, "CS 101 Final");
        assert_eq!(valid.event_type, "assignment");
        assert_eq!(valid.display_type(), "Assignment");
        assert_eq!(valid.category, TaskCategory::Work);

        let gym = EventRequest::new("Leg day", "gym", due(), Priority::Low, 1.0)
            .validate()
            .unwrap();
        assert_eq!(gym.category, TaskCategory::Personal);

        let overridden = EventRequest::new("Team dinner", "meeting", due(), Priority::Low, 2.0)
            .with_category(TaskCategory::Personal)
            .validate()
            .unwrap();
        assert_eq!(overridden.category, TaskCategory::Personal);
    }

    #[test]
    fn reports_every_failing_field() {
        let request = EventRequest {
            title: "   ".to_string(),
            event_type: String::new(),
            due_date: None,
            priority: Priority::Medium,
            estimated_hours: 0.25,
            recurrence: None,
            category: None,
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 4);
        assert_eq!(errors.for_field("title"), Some(&ValidationError::EmptyTitle));
        assert_eq!(errors.for_field("type"), Some(&ValidationError::MissingType));
        assert_eq!(errors.for_field("dueDate"), Some(&ValidationError::MissingDueDate));
        assert!(errors.for_field("estimatedHours").is_some());
    }

    #[test]
    fn title_length_and_hour_bounds() {
        let long = "x".repeat(101);
        let errors = EventRequest::new(long, "study", due(), Priority::Low, 24.5)
            .validate()
            .unwrap_err();
        assert!(matches!(
            errors.for_field("title"),
            Some(ValidationError::TitleTooLong { len: 101, max: 100 })
        ));
        assert!(errors.for_field("estimatedHours").is_some());

        assert!(EventRequest::new("x".repeat(100), "study", due(), Priority::Low, 0.5)
            .validate()
            .is_ok());
        assert!(EventRequest::new("ok", "study", due(), Priority::Low, 24.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn recurrence_end_before_due_is_rejected() {
        let request = EventRequest::new("Run", "gym", due(), Priority::Low, 1.0).with_recurrence(
            Recurrence {
                frequency: Frequency::Weekly,
                end_date: Some(Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap()),
            },
        );
        let errors = request.validate().unwrap_err();
        assert!(errors.for_field("recurrence").is_some());
    }

    #[test]
    fn deserializes_presentation_payload() {
        let request: EventRequest = serde_json::from_str(
            r#"{"title":"Midterm","type":"exam","dueDate":"2025-11-24T23:59:00Z","priority":"high","estimatedHours":8,"recurrence":{"frequency":"weekly"}}"#,
        )
        .unwrap();
        assert_eq!(request.priority, Priority::High);
        assert_eq!(request.due_date, Some(due()));
        assert_eq!(request.recurrence.unwrap().frequency, Frequency::Weekly);
    }
}
