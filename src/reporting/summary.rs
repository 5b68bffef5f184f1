//! Rollup summaries across classified products.

use serde::{Deserialize, Serialize};

use super::delivery::{round1, DeliveryClassification};

/// Aggregate metrics for one indicator or one work package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySummary {
    pub count: usize,
    pub average_completion: f64,
    pub total_tasks: usize,
    pub total_completed: usize,
    pub total_overdue: usize,
}

/// Reduce a set of per-product classifications.
///
/// `average_completion` is the unweighted mean of per-product completion
/// percentages: a product with 2 tasks counts the same as one with 200. The
/// unweighted mean is load-bearing behavior, not an oversight.
pub fn summarize<'a, I>(classifications: I) -> DeliverySummary
where
    I: IntoIterator<Item = &'a DeliveryClassification>,
{
    let mut summary = DeliverySummary::default();
    let mut completion_sum = 0.0;

    for c in classifications {
        summary.count += 1;
        completion_sum += c.completion_percentage;
        summary.total_tasks += c.total_tasks;
        summary.total_completed += c.completed_tasks;
        summary.total_overdue += c.overdue_tasks;
    }

    if summary.count > 0 {
        summary.average_completion = round1(completion_sum / summary.count as f64);
    }
    summary
}
