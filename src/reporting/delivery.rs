//! Delivery status aggregation.
//!
//! The status is decided by an ordered rule chain, first match wins. The
//! thresholds interact (30/7 days, 90/50 percent), so this stays an explicit
//! sequence of rules rather than a table or weighted score. Overdue severity
//! always dominates completion ratio: a 90%-complete product with one
//! 45-day-overdue task is `critical`.

use serde::{Deserialize, Serialize};

use super::classify::TaskState;

/// Closed set of delivery status labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Critical,
    VeryDelayed,
    Delayed,
    DueToday,
    AlmostComplete,
    InProgress,
    OnTime,
}

/// Per-product rollup of task classifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryClassification {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    pub due_today_tasks: usize,
    pub max_days_overdue: i64,
    pub completion_percentage: f64,
    pub delivery_status: DeliveryStatus,
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Roll up one product's task states into a single classification.
///
/// `completion_percentage` is always defined: zero tasks means 0.0 and the
/// status defaults to `on_time`.
pub fn classify_delivery(states: &[TaskState]) -> DeliveryClassification {
    let total_tasks = states.len();
    let completed_tasks = states
        .iter()
        .filter(|s| matches!(s, TaskState::Completed))
        .count();
    let overdue_tasks = states.iter().filter(|s| s.is_overdue()).count();
    let due_today_tasks = states
        .iter()
        .filter(|s| matches!(s, TaskState::DueToday))
        .count();
    let max_days_overdue = states.iter().map(TaskState::days_overdue).max().unwrap_or(0);

    let completion_percentage = if total_tasks == 0 {
        0.0
    } else {
        round1(completed_tasks as f64 / total_tasks as f64 * 100.0)
    };

    let delivery_status = if overdue_tasks > 0 && max_days_overdue > 30 {
        DeliveryStatus::Critical
    } else if overdue_tasks > 0 && max_days_overdue > 7 {
        DeliveryStatus::VeryDelayed
    } else if overdue_tasks > 0 {
        DeliveryStatus::Delayed
    } else if due_today_tasks > 0 {
        DeliveryStatus::DueToday
    } else if completion_percentage >= 90.0 {
        DeliveryStatus::AlmostComplete
    } else if completion_percentage >= 50.0 {
        DeliveryStatus::InProgress
    } else {
        DeliveryStatus::OnTime
    };

    DeliveryClassification {
        total_tasks,
        completed_tasks,
        overdue_tasks,
        due_today_tasks,
        max_days_overdue,
        completion_percentage,
        delivery_status,
    }
}
