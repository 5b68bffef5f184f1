//! Task status classification.
//!
//! All date comparisons are calendar-day comparisons on `NaiveDate` in one
//! fixed reference timezone (UTC); days overdue is whole-day arithmetic,
//! never raw timestamp subtraction, so day boundaries cannot shift the
//! result.

use chrono::NaiveDate;

use crate::models::TaskRow;

/// Status names treated as completed regardless of dates.
pub const COMPLETED_STATUSES: [&str; 4] = ["completed", "reviewed", "done", "finished"];

/// Temporal state of one task at an evaluation date. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Completed,
    Overdue { days_overdue: i64 },
    DueToday,
    InProgress,
    NotStarted,
}

impl TaskState {
    pub fn is_overdue(&self) -> bool {
        matches!(self, TaskState::Overdue { .. })
    }

    /// Meaningful only for overdue tasks; zero otherwise.
    pub fn days_overdue(&self) -> i64 {
        match self {
            TaskState::Overdue { days_overdue } => *days_overdue,
            _ => 0,
        }
    }
}

fn is_completed_status(status: Option<&str>) -> bool {
    status
        .map(|s| {
            let s = s.trim();
            COMPLETED_STATUSES.iter().any(|c| s.eq_ignore_ascii_case(c))
        })
        .unwrap_or(false)
}

/// Classify one task against `today`.
///
/// A task with no planned end can never be overdue or due today; it is in
/// progress when actually started, otherwise not started.
pub fn classify_task(task: &TaskRow, today: NaiveDate) -> TaskState {
    if is_completed_status(task.status_name.as_deref()) {
        return TaskState::Completed;
    }

    match task.planned_end {
        Some(planned_end) if planned_end < today => TaskState::Overdue {
            days_overdue: (today - planned_end).num_days(),
        },
        Some(planned_end) if planned_end == today => TaskState::DueToday,
        _ if task.actual_start.is_some() => TaskState::InProgress,
        _ => TaskState::NotStarted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn task(planned_end: Option<&str>, actual_start: Option<&str>, status: Option<&str>) -> TaskRow {
        TaskRow {
            task_id: 1,
            planned_end: planned_end.map(date),
            actual_end: None,
            actual_start: actual_start.map(date),
            status_name: status.map(str::to_string),
        }
    }

    #[test]
    fn completed_statuses_win_over_dates() {
        let today = date("2024-01-15");
        for status in ["Completed", "reviewed", "DONE", " Finished "] {
            let state = classify_task(&task(Some("2023-12-01"), None, Some(status)), today);
            assert_eq!(state, TaskState::Completed, "status {status:?}");
        }
    }

    #[test]
    fn pending_status_does_not_complete() {
        let today = date("2024-01-15");
        let state = classify_task(&task(Some("2024-01-10"), None, Some("Pending")), today);
        assert_eq!(state, TaskState::Overdue { days_overdue: 5 });
    }

    #[test]
    fn days_overdue_is_whole_calendar_days() {
        let today = date("2024-03-01");
        let state = classify_task(&task(Some("2024-01-16"), None, None), today);
        assert_eq!(state, TaskState::Overdue { days_overdue: 45 });
    }

    #[test]
    fn due_today_is_date_equality() {
        let today = date("2024-01-15");
        let state = classify_task(&task(Some("2024-01-15"), None, Some("Pending")), today);
        assert_eq!(state, TaskState::DueToday);
    }

    #[test]
    fn future_end_with_actual_start_is_in_progress() {
        let today = date("2024-01-15");
        let state = classify_task(&task(Some("2024-02-01"), Some("2024-01-10"), None), today);
        assert_eq!(state, TaskState::InProgress);
    }

    #[test]
    fn future_end_without_start_is_not_started() {
        let today = date("2024-01-15");
        let state = classify_task(&task(Some("2024-02-01"), None, Some("Pending")), today);
        assert_eq!(state, TaskState::NotStarted);
    }

    #[test]
    fn missing_planned_end_is_never_overdue() {
        let today = date("2024-01-15");
        assert_eq!(
            classify_task(&task(None, Some("2024-01-02"), None), today),
            TaskState::InProgress
        );
        assert_eq!(classify_task(&task(None, None, None), today), TaskState::NotStarted);
    }
}
