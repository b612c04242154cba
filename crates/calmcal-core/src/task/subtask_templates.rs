//! Subtask templates for event decomposition.
//!
//! Each event type maps to an ordered list of subtasks with fixed durations.
//! Personal event types (sleep, gym, movie, travel) have empty templates,
//! meaning the event becomes one task instead of a chain.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TaskCategory;

/// Event types that are implicitly personal.
pub const PERSONAL_EVENT_TYPES: [&str; 4] = ["sleep", "gym", "movie", "travel"];

/// One step of an event template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubtaskTemplate {
    pub title: String,
    /// Fixed duration in hours
    #[serde(alias = "duration")]
    pub duration_hours: f64,
    /// 1-based position in the chain
    pub order: u32,
}

impl SubtaskTemplate {
    pub fn new(title: impl Into<String>, duration_hours: f64, order: u32) -> Self {
        Self {
            title: title.into(),
            duration_hours,
            order,
        }
    }
}

/// Category implied by an event type: personal types are personal, the rest work.
pub fn infer_category(event_type: &str) -> TaskCategory {
    let normalized = event_type.trim().to_ascii_lowercase();
    if PERSONAL_EVENT_TYPES.contains(&normalized.as_str()) {
        TaskCategory::Personal
    } else {
        TaskCategory::Work
    }
}

/// Immutable per-type template table.
///
/// Built once (from the defaults, optionally overlaid with configured
/// templates) and handed to whatever expands events.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtaskCatalog {
    templates: BTreeMap<String, Vec<SubtaskTemplate>>,
}

impl SubtaskCatalog {
    /// Catalog from an explicit map; keys are matched case-insensitively.
    pub fn from_map(templates: BTreeMap<String, Vec<SubtaskTemplate>>) -> Self {
        let templates = templates
            .into_iter()
            .map(|(k, mut steps)| {
                steps.sort_by_key(|s| s.order);
                (k.trim().to_ascii_lowercase(), steps)
            })
            .collect();
        Self { templates }
    }

    /// Built-in templates.
    pub fn builtin() -> Self {
        let mut templates = BTreeMap::new();

        templates.insert(
            "assignment".to_string(),
            vec![
                SubtaskTemplate::new("Research & Gather Resources", 1.0, 1),
                SubtaskTemplate::new("Create Outline", 0.5, 2),
                SubtaskTemplate::new("Write First Draft", 2.0, 3),
                SubtaskTemplate::new("Review & Edit", 1.0, 4),
                SubtaskTemplate::new("Final Review & Submit", 0.5, 5),
            ],
        );
        templates.insert(
            "study".to_string(),
            vec![
                SubtaskTemplate::new("Review Lecture Notes", 1.0, 1),
                SubtaskTemplate::new("Read Course Material", 1.5, 2),
                SubtaskTemplate::new("Practice Problems", 2.0, 3),
                SubtaskTemplate::new("Create Summary Notes", 1.0, 4),
                SubtaskTemplate::new("Self-Assessment Quiz", 0.5, 5),
            ],
        );
        templates.insert(
            "project".to_string(),
            vec![
                SubtaskTemplate::new("Project Planning & Requirements", 1.0, 1),
                SubtaskTemplate::new("Research & Design", 2.0, 2),
                SubtaskTemplate::new("Implementation Phase 1", 3.0, 3),
                SubtaskTemplate::new("Implementation Phase 2", 3.0, 4),
                SubtaskTemplate::new("Testing & Debugging", 2.0, 5),
                SubtaskTemplate::new("Documentation", 1.0, 6),
                SubtaskTemplate::new("Final Review", 1.0, 7),
            ],
        );
        templates.insert(
            "exam".to_string(),
            vec![
                SubtaskTemplate::new("Review All Materials", 2.0, 1),
                SubtaskTemplate::new("Practice Past Exams", 2.0, 2),
                SubtaskTemplate::new("Focus on Weak Areas", 2.0, 3),
                SubtaskTemplate::new("Create Cheat Sheet/Summary", 1.0, 4),
                SubtaskTemplate::new("Final Review Session", 1.5, 5),
            ],
        );
        templates.insert(
            "meeting".to_string(),
            vec![
                SubtaskTemplate::new("Prepare Agenda", 0.5, 1),
                SubtaskTemplate::new("Review Materials", 0.5, 2),
                SubtaskTemplate::new("Actual Meeting", 1.0, 3),
                SubtaskTemplate::new("Follow-up Actions", 0.5, 4),
            ],
        );
        for personal in PERSONAL_EVENT_TYPES {
            templates.insert(personal.to_string(), Vec::new());
        }

        Self { templates }
    }

    /// New catalog with `overrides` replacing (or adding) per-type entries.
    pub fn with_overrides(&self, overrides: &BTreeMap<String, Vec<SubtaskTemplate>>) -> Self {
        let mut templates = self.templates.clone();
        templates.extend(Self::from_map(overrides.clone()).templates);
        Self { templates }
    }

    /// Ordered subtasks for an event type.
    ///
    /// Unknown and personal types yield an empty list, which tells the caller
    /// to create a single task instead.
    pub fn expand(&self, event_type: &str) -> Vec<SubtaskTemplate> {
        self.templates
            .get(&event_type.trim().to_ascii_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    /// Whether the type has a template entry (possibly empty).
    pub fn knows(&self, event_type: &str) -> bool {
        self.templates
            .contains_key(&event_type.trim().to_ascii_lowercase())
    }

    /// Sum of template durations for a type.
    pub fn total_hours(&self, event_type: &str) -> f64 {
        self.expand(event_type).iter().map(|s| s.duration_hours).sum()
    }

    /// All event types, sorted.
    pub fn event_types(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }
}

impl Default for SubtaskCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_has_five_ordered_steps_totalling_five_hours() {
        let catalog = SubtaskCatalog::builtin();
        let steps = catalog.expand("assignment");

        assert_eq!(steps.len(), 5);
        let orders: Vec<u32> = steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
        assert_eq!(steps[0].title, "Research & Gather Resources");
        assert!((catalog.total_hours("assignment") - 5.0).abs() < 1e-9);
    }

    #[test]
    fn personal_types_expand_to_nothing() {
        let catalog = SubtaskCatalog::builtin();
        for t in PERSONAL_EVENT_TYPES {
            assert!(catalog.knows(t));
            assert!(catalog.expand(t).is_empty(), "{t} should have no subtasks");
        }
        assert!(catalog.expand("unheard-of").is_empty());
    }

    #[test]
    fn template_totals() {
        let catalog = SubtaskCatalog::builtin();
        assert!((catalog.total_hours("study") - 6.0).abs() < 1e-9);
        assert!((catalog.total_hours("project") - 13.0).abs() < 1e-9);
        assert!((catalog.total_hours("exam") - 8.5).abs() < 1e-9);
        assert!((catalog.total_hours("meeting") - 2.5).abs() < 1e-9);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = SubtaskCatalog::builtin();
        assert_eq!(catalog.expand("Exam").len(), 5);
        assert_eq!(catalog.expand(" MEETING ").len(), 4);
    }

    #[test]
    fn overrides_produce_a_new_catalog() {
        let base = SubtaskCatalog::builtin();
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "Gym".to_string(),
            vec![
                SubtaskTemplate::new("Workout", 1.0, 2),
                SubtaskTemplate::new("Warm-up", 0.25, 1),
            ],
        );

        let custom = base.with_overrides(&overrides);
        let steps = custom.expand("gym");
        assert_eq!(steps[0].title, "Warm-up");
        assert_eq!(steps[1].title, "Workout");
        assert!(base.expand("gym").is_empty());
        assert_eq!(custom.expand("assignment"), base.expand("assignment"));
    }

    #[test]
    fn category_inference() {
        assert_eq!(infer_category("sleep"), TaskCategory::Personal);
        assert_eq!(infer_category("Travel"), TaskCategory::Personal);
        assert_eq!(infer_category("exam"), TaskCategory::Work);
        assert_eq!(infer_category("anything-else"), TaskCategory::Work);
    }
}
