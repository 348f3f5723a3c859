//! Habit streak calculation.
//!
//! A habit's `completions` column holds entries like
//! `{"date": "2024-03-01", "completed": true}`. The streak is the number of
//! consecutive days with a completion, ending today, or ending yesterday when
//! today has not been ticked off yet.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Extracts the set of completed days from a completions document.
///
/// Non-array documents, unparseable dates and entries with
/// `"completed": false` contribute nothing.
pub fn completed_days(completions: &Value) -> HashSet<NaiveDate> {
    let Some(entries) = completions.as_array() else {
        return HashSet::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(date) => Some(date.as_str()),
            Value::Object(obj) => {
                if obj.get("completed") == Some(&Value::Bool(false)) {
                    return None;
                }
                obj.get("date").and_then(Value::as_str)
            }
            _ => None,
        })
        .filter_map(|date| NaiveDate::parse_from_str(date, DATE_FORMAT).ok())
        .collect()
}

/// Computes the current streak as of `today`.
pub fn current_streak(completions: &Value, today: NaiveDate) -> i32 {
    let days = completed_days(completions);

    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}
