//! Some utility functions

use chrono::DateTime;

use crate::store::TaskStore;

/// A debug utility that pretty-prints the contents of a task store
pub fn print_task_store(store: &TaskStore) {
    for (date, tasks) in store.iter() {
        println!("DAY {}", date);
        for task in tasks {
            let completion = if task.done() { "✓" } else { " " };
            let time = match task.time().and_then(split_time_string) {
                Some((hours, minutes)) => format!("{}:{}", hours, minutes),
                None => "     ".to_string(),
            };
            println!("    {} {}\t{} [{}]\t{}", completion, time, task.title(), task.category(), task.id());
        }
    }
}

/// Split a time into zero-padded hour and minute strings, for form display.
/// Accepts both a full ISO-8601 timestamp and a bare `HH:MM[:SS]` clock time.
pub fn split_time_string(time: &str) -> Option<(String, String)> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(time) {
        return Some((stamp.format("%H").to_string(), stamp.format("%M").to_string()));
    }

    let mut parts = time.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some((format!("{:02}", hours), format!("{:02}", minutes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_time_string() {
        assert_eq!(split_time_string("8:05"), Some(("08".to_string(), "05".to_string())));
        assert_eq!(split_time_string("23:59:10"), Some(("23".to_string(), "59".to_string())));
        assert_eq!(
            split_time_string("2024-05-01T08:30:00Z"),
            Some(("08".to_string(), "30".to_string()))
        );
        assert_eq!(split_time_string("25:00"), None);
        assert_eq!(split_time_string("noonish"), None);
    }
}
