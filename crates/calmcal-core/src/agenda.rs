//! Read-only views over a task list: what is running, what is next, what is on a day.

use chrono::{DateTime, NaiveDate, Utc};

use crate::task::Task;

/// Tasks starting strictly after `now`, soonest first, optionally capped.
pub fn upcoming(tasks: &[Task], now: DateTime<Utc>, limit: Option<usize>) -> Vec<&Task> {
    let mut next: Vec<&Task> = tasks.iter().filter(|t| t.start > now).collect();
    next.sort_by_key(|t| t.start);
    if let Some(limit) = limit {
        next.truncate(limit);
    }
    next
}

/// Tasks running at `now` (start and end inclusive).
pub fn in_progress(tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.start <= now && t.end() >= now)
        .collect()
}

/// Tasks whose start falls on `date`, by start time.
pub fn on_date(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    let mut day: Vec<&Task> = tasks.iter().filter(|t| t.day() == date).collect();
    day.sort_by_key(|t| t.start);
    day
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::StressLevel;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, day, hour, 0, 0).unwrap()
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("Late", "Study", at(18, 15), 1.0, StressLevel::Low).with_id("late"),
            Task::new("Now", "Study", at(17, 9), 2.0, StressLevel::Low).with_id("now"),
            Task::new("Soon", "Study", at(17, 13), 1.0, StressLevel::Low).with_id("soon"),
            Task::new("Past", "Study", at(16, 9), 1.0, StressLevel::Low).with_id("past"),
        ]
    }

    fn ids(tasks: Vec<&Task>) -> Vec<&str> {
        tasks.into_iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn upcoming_is_sorted_and_limited() {
        let all = tasks();
        assert_eq!(ids(upcoming(&all, at(17, 10), None)), vec!["soon", "late"]);
        assert_eq!(ids(upcoming(&all, at(17, 10), Some(1))), vec!["soon"]);
        // A task starting exactly now is not upcoming
        assert_eq!(ids(upcoming(&all, at(17, 13), None)), vec!["late"]);
    }

    #[test]
    fn in_progress_includes_boundaries() {
        let all = tasks();
        assert_eq!(ids(in_progress(&all, at(17, 10))), vec!["now"]);
        assert_eq!(ids(in_progress(&all, at(17, 11))), vec!["now"]);
        assert!(in_progress(&all, at(17, 12)).is_empty());
    }

    #[test]
    fn on_date_selects_one_day() {
        let all = tasks();
        let day = NaiveDate::from_ymd_opt(2025, 11, 17).unwrap();
        assert_eq!(ids(on_date(&all, day)), vec!["now", "soon"]);
    }
}
