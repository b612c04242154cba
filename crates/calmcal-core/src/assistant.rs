//! Context handed to the external chat assistant.
//!
//! A read-only copy of the schedule; the assistant never writes back.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::preferences::Preferences;
use crate::task::Task;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssistantContext {
    pub tasks: Vec<Task>,
    pub preferences: Preferences,
}

impl AssistantContext {
    pub fn new(tasks: &[Task], preferences: &Preferences) -> Self {
        Self {
            tasks: tasks.to_vec(),
            preferences: preferences.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::StressLevel;
    use chrono::{TimeZone, Utc};

    #[test]
    fn serializes_wire_shape() {
        let start = Utc.with_ymd_and_hms(2025, 11, 17, 9, 0, 0).unwrap();
        let tasks = vec![Task::new("Essay", "Assignment", start, 2.0, StressLevel::High)];
        let ctx = AssistantContext::new(&tasks, &Preferences::default().with_work_hours(5.0));

        let json: serde_json::Value = serde_json::from_str(&ctx.to_json().unwrap()).unwrap();
        assert_eq!(json["tasks"][0]["date"], "2025-11-17T09:00:00Z");
        assert_eq!(json["tasks"][0]["type"], "Assignment");
        assert_eq!(json["preferences"]["workHoursPerDay"], 5.0);
    }
}
